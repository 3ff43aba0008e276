use crate::private::Sealed;
use crate::r#type::TypePtr;
use crate::{Error, Result as AtlasResult};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::cmp::Ordering;
use std::collections::hash_map::{IntoIter, IntoValues, Keys, Values};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// An in-memory value, convertible from and to the driver representation of
/// a statement parameter or a result column.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    NULL,
    Int(i64),
    UInt(u64),
    String(String),
    Bytes(Vec<u8>),
    Float(f64),
    Boolean(bool),

    Array(Vec<Value>),

    /// date-time
    DateTime(DateTime<Local>),

    /// json
    Json(serde_json::Value),

    /// uuid
    Uuid(uuid::Uuid),
}

impl Default for &Value {
    fn default() -> Self {
        &Value::NULL
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::NULL)
    }

    fn is_string_eq(&self, str: &str) -> bool {
        match self {
            Value::String(cur) => cur == str,
            _ => false,
        }
    }

    fn is_int_eq(&self, val: i64) -> bool {
        match *self {
            Value::Int(cur) => cur == val,
            _ => false,
        }
    }

    fn is_uint_eq(&self, val: u64) -> bool {
        match *self {
            Value::UInt(cur) => cur == val,
            _ => false,
        }
    }

    fn is_float_eq(&self, val: f64) -> bool {
        match *self {
            Value::Float(cur) => cur == val,
            _ => false,
        }
    }

    fn is_bytes_eq(&self, val: &[u8]) -> bool {
        match self {
            Value::Bytes(cur) => cur.as_slice().cmp(val) == Ordering::Equal,
            _ => false,
        }
    }

    fn is_boolean_eq(&self, val: bool) -> bool {
        match *self {
            Value::Boolean(cur) => cur == val,
            _ => false,
        }
    }

    fn is_datetime_eq<Tz: TimeZone>(&self, val: &DateTime<Tz>) -> bool {
        match self {
            Value::DateTime(cur) => cur == val,
            _ => false,
        }
    }

    fn is_json_eq(&self, val: &serde_json::Value) -> bool {
        match self {
            Value::Json(cur) => cur == val,
            _ => false,
        }
    }

    fn is_uuid_eq(&self, val: &uuid::Uuid) -> bool {
        match self {
            Value::Uuid(cur) => cur == val,
            _ => false,
        }
    }

    pub fn try_into_vec(self) -> AtlasResult<Vec<Value>> {
        match self {
            Value::Array(v) => Ok(v),
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Value::NULL => "NULL".to_string(),
            Value::Int(value) => value.to_string(),
            Value::UInt(value) => value.to_string(),
            Value::String(value) => value.clone(),
            Value::Bytes(value) => format!("Bytes (len: {}) <{:02X?}>", value.len(), value),
            Value::Float(value) => value.to_string(),
            Value::Boolean(value) => (if *value { "true" } else { "false" }).to_string(),
            Value::DateTime(value) => value.to_string(),
            Value::Array(value) => format!("Array (len: {}) {:?}", value.len(), value),
            Value::Json(value) => value.to_string(),
            Value::Uuid(value) => value.to_string(),
        };

        write!(f, "{}", str)
    }
}

impl Eq for Value {}
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match self {
            Value::NULL => other.is_null(),
            Value::Int(value) => other.is_int_eq(*value),
            Value::UInt(value) => other.is_uint_eq(*value),
            Value::String(value) => other.is_string_eq(value),
            Value::Bytes(value) => other.is_bytes_eq(value),
            Value::Float(value) => other.is_float_eq(*value),
            Value::Boolean(value) => other.is_boolean_eq(*value),
            Value::DateTime(value) => other.is_datetime_eq(value),
            Value::Json(value) => other.is_json_eq(value),
            Value::Uuid(value) => other.is_uuid_eq(value),
            Value::Array(value) => {
                if let Value::Array(other) = other {
                    value.eq(other)
                } else {
                    false
                }
            }
        }
    }
}

macro_rules! value_from_int {
    ($variant:ident, $target:ty, $($source:ty),+) => {$(
        impl From<$source> for Value {
            #[inline]
            fn from(value: $source) -> Self {
                Value::$variant(value as $target)
            }
        }

        impl From<&$source> for Value {
            #[inline]
            fn from(value: &$source) -> Self {
                Value::$variant(*value as $target)
            }
        }

        impl TryFrom<Value> for $source {
            type Error = Error;

            #[inline]
            fn try_from(value: Value) -> Result<Self, Self::Error> {
                <$source>::try_from(&value)
            }
        }

        impl TryFrom<&Value> for $source {
            type Error = Error;

            #[inline]
            fn try_from(value: &Value) -> Result<Self, Self::Error> {
                match value {
                    Value::Int(value) => Ok(<$source>::try_from(*value)?),
                    Value::UInt(value) => Ok(<$source>::try_from(*value)?),
                    _ => Err(Error::type_mismatch()),
                }
            }
        }
    )+};
}

value_from_int!(Int, i64, i8, i16, i32, i64, isize);
value_from_int!(UInt, u64, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    #[inline]
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(value) => Ok(value),
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl TryFrom<&Value> for String {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(value) => Ok(value.clone()),
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&bool> for Value {
    #[inline]
    fn from(value: &bool) -> Self {
        Value::Boolean(*value)
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        bool::try_from(&value)
    }
}

impl TryFrom<&Value> for bool {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Boolean(value) => Ok(*value),
            Value::Int(0) | Value::UInt(0) => Ok(false),
            Value::Int(1) | Value::UInt(1) => Ok(true),
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&f64> for Value {
    #[inline]
    fn from(value: &f64) -> Self {
        Value::Float(*value)
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(&value)
    }
}

impl TryFrom<&Value> for f64 {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(value) => Ok(*value),
            Value::Int(value) => Ok(*value as f64),
            Value::UInt(value) => Ok(*value as f64),
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl<V: Into<Value> + 'static> From<Vec<V>> for Value {
    fn from(value: Vec<V>) -> Self {
        use std::any::TypeId;
        if TypeId::of::<V>() == TypeId::of::<u8>() {
            Value::Bytes(unsafe { std::mem::transmute::<Vec<V>, Vec<u8>>(value) })
        } else {
            Value::Array(value.into_iter().map(|v| v.into()).collect::<Vec<_>>())
        }
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Value::Bytes(Vec::from(value))
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    #[inline]
    fn from(value: &[u8; N]) -> Self {
        Value::Bytes(Vec::from(value.as_slice()))
    }
}

impl TryFrom<&Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bytes(value) => Ok(value.clone()),
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    #[inline]
    fn from(value: DateTime<Tz>) -> Self {
        Value::DateTime(Local.from_utc_datetime(&value.naive_utc()))
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Value {
    #[inline]
    fn from(value: &DateTime<Tz>) -> Self {
        Value::DateTime(Local.from_utc_datetime(&value.naive_utc()))
    }
}

impl TryFrom<&Value> for DateTime<Local> {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            Value::String(repr) => DateTime::parse_from_rfc3339(repr)
                .map(Into::into)
                .map_err(|_| Error::type_mismatch()),
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl TryFrom<Value> for DateTime<Local> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        DateTime::<Local>::try_from(&value)
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        DateTime::<Local>::try_from(&value).map(Into::into)
    }
}

impl From<serde_json::Value> for Value {
    #[inline]
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Json(value) => Ok(value.clone()),
            Value::String(repr) => {
                serde_json::from_str(repr).map_err(|_| Error::type_mismatch())
            }
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl From<uuid::Uuid> for Value {
    #[inline]
    fn from(value: uuid::Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<&uuid::Uuid> for Value {
    #[inline]
    fn from(value: &uuid::Uuid) -> Self {
        Value::Uuid(*value)
    }
}

impl TryFrom<&Value> for uuid::Uuid {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Uuid(value) => Ok(*value),
            Value::String(repr) => uuid::Uuid::parse_str(repr).map_err(|_| Error::type_mismatch()),
            _ => Err(Error::type_mismatch()),
        }
    }
}

pub struct UntypedValueMap<'s>(pub HashMap<&'s str, Value>);
pub struct TypedValueMap<'s>(pub HashMap<&'s str, TypedValue>);

impl Sealed for UntypedValueMap<'_> {}
impl Sealed for TypedValueMap<'_> {}

impl<'s> From<UntypedValueMap<'s>> for HashMap<&'s str, Value> {
    fn from(value: UntypedValueMap<'s>) -> Self {
        value.0
    }
}

impl<'s> From<TypedValueMap<'s>> for HashMap<&'s str, TypedValue> {
    fn from(value: TypedValueMap<'s>) -> Self {
        value.0
    }
}

#[allow(private_bounds)]
pub trait ValueMap<'s>: Into<HashMap<&'s str, Self::Item>> + Sealed {
    type Item;

    /// Gets the map as std HashMap reference
    fn as_map(&self) -> &HashMap<&'s str, Self::Item>;

    /// Returns true if the map has no element.
    fn is_empty(&self) -> bool {
        self.as_map().is_empty()
    }

    /// Returns the size of the map.
    fn len(&self) -> usize {
        self.as_map().len()
    }

    /// Returns an iterator visiting all keys in the map.
    fn keys(&self) -> Keys<'_, &'s str, Self::Item> {
        self.as_map().keys()
    }

    /// Returns an iterator visiting all values in the map.
    fn values(&self) -> Values<'_, &'s str, Self::Item> {
        self.as_map().values()
    }

    /// Creates a consuming iterator visiting all the values is the map.
    /// The map cannot be used after this call.
    fn into_values(self) -> IntoValues<&'s str, Self::Item> {
        self.into().into_values()
    }

    /// Creates a consuming iterator visiting all the key-value pairs in the map.
    /// The map cannot be used after this call.
    fn into_iter(self) -> IntoIter<&'s str, Self::Item> {
        self.into().into_iter()
    }
}

impl<'s> ValueMap<'s> for UntypedValueMap<'s> {
    type Item = Value;

    fn as_map(&self) -> &HashMap<&'s str, Self::Item> {
        &self.0
    }
}

impl<'s> ValueMap<'s> for TypedValueMap<'s> {
    type Item = TypedValue;

    fn as_map(&self) -> &HashMap<&'s str, Self::Item> {
        &self.0
    }
}

/// A value paired with the handler which converts it, when one has been
/// declared explicitly.
#[derive(Clone)]
pub struct TypedValue {
    pub value: Value,
    pub r#type: Option<TypePtr>,
}

impl From<TypedValue> for Value {
    fn from(value: TypedValue) -> Self {
        value.value
    }
}

impl From<Value> for TypedValue {
    fn from(value: Value) -> Self {
        Self {
            value,
            r#type: None,
        }
    }
}

impl<'a> From<TypedValueMap<'a>> for UntypedValueMap<'a> {
    fn from(value: TypedValueMap<'a>) -> Self {
        let mut map = HashMap::with_capacity(value.len());
        for (k, v) in value.0.into_iter() {
            map.insert(k, v.value);
        }

        Self(map)
    }
}

impl<'a> From<UntypedValueMap<'a>> for TypedValueMap<'a> {
    fn from(value: UntypedValueMap<'a>) -> Self {
        let mut map = HashMap::with_capacity(value.len());
        for (k, v) in value.0.into_iter() {
            map.insert(k, TypedValue::from(v));
        }

        Self(map)
    }
}
