use crate::error::Error;
use crate::parameter_type::ParameterType;
use crate::Value;
use std::fmt::{Display, Formatter};

/// Identifies a placeholder of a prepared statement, either by 0-indexed
/// position or by name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ParameterIndex {
    Positional(usize),
    Named(String),
}

impl Display for ParameterIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterIndex::Positional(index) => write!(f, "#{}", index),
            ParameterIndex::Named(name) => write!(f, ":{}", name),
        }
    }
}

impl From<String> for ParameterIndex {
    fn from(value: String) -> Self {
        ParameterIndex::Named(value)
    }
}

impl From<&str> for ParameterIndex {
    fn from(value: &str) -> Self {
        ParameterIndex::Named(String::from(value))
    }
}

impl From<i32> for ParameterIndex {
    fn from(value: i32) -> Self {
        ParameterIndex::Positional(value as usize)
    }
}

impl From<usize> for ParameterIndex {
    fn from(value: usize) -> Self {
        ParameterIndex::Positional(value)
    }
}

/// A value paired with the binding type the driver receives.
#[derive(Clone, Debug)]
pub struct Parameter {
    pub(crate) value: Value,
    pub(crate) value_type: ParameterType,
}

impl Parameter {
    pub fn new(value: Value, param_type: ParameterType) -> Self {
        Parameter {
            value,
            value_type: param_type,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_type(&self) -> ParameterType {
        self.value_type
    }
}

impl<T: Into<Value>> From<T> for Parameter {
    fn from(value: T) -> Self {
        let value = value.into();
        let value_type = match &value {
            Value::NULL => ParameterType::Null,
            Value::UInt(_) | Value::Int(_) => ParameterType::Integer,
            Value::Float(_) => ParameterType::Float,
            Value::Bytes(_) => ParameterType::Binary,
            Value::Boolean(_) => ParameterType::Boolean,
            _ => ParameterType::String,
        };

        Parameter { value, value_type }
    }
}

#[derive(Debug)]
pub enum Parameters<'a> {
    Vec(Vec<(ParameterIndex, Parameter)>),
    Array(&'a [(ParameterIndex, Parameter)]),
}

impl Parameters<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            Parameters::Vec(vec) => vec.is_empty(),
            Parameters::Array(arr) => arr.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Parameters::Vec(vec) => vec.len(),
            Parameters::Array(arr) => arr.len(),
        }
    }
}

impl From<Parameters<'_>> for Vec<(ParameterIndex, Parameter)> {
    fn from(value: Parameters) -> Self {
        match value {
            Parameters::Vec(v) => v,
            Parameters::Array(v) => v.to_vec(),
        }
    }
}

impl From<Vec<Parameter>> for Parameters<'_> {
    fn from(value: Vec<Parameter>) -> Self {
        Parameters::Vec(
            value
                .into_iter()
                .enumerate()
                .map(|(idx, value)| (ParameterIndex::Positional(idx), value))
                .collect(),
        )
    }
}

impl TryFrom<Parameter> for i64 {
    type Error = Error;

    fn try_from(value: Parameter) -> Result<Self, Self::Error> {
        match value.value {
            Value::Int(i) => Ok(i),
            Value::UInt(i) => i64::try_from(i).map_err(|e| e.into()),
            Value::Boolean(b) => Ok(i64::from(b)),
            _ => Err(Error::type_mismatch()),
        }
    }
}

impl TryFrom<Parameter> for f64 {
    type Error = Error;

    fn try_from(value: Parameter) -> Result<Self, Self::Error> {
        match value.value {
            Value::Float(f) => Ok(f),
            _ => Err(Error::type_mismatch()),
        }
    }
}

pub const NO_PARAMS: Parameters = Parameters::Array(&[]);

#[macro_export]
macro_rules! params {
    [] => {
        $crate::NO_PARAMS
    };

    [$($idx:expr => $value:expr),+ $(,)?] => {
        $crate::Parameters::Vec(vec![
            $( ($crate::ParameterIndex::from($idx), $crate::Parameter::from($value)) ),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::{Parameter, ParameterIndex, Parameters};
    use crate::{ParameterType, Value};

    #[test]
    fn parameter_index_display_includes_the_position_or_name() {
        assert_eq!(ParameterIndex::Positional(2).to_string(), "#2");
        assert_eq!(ParameterIndex::Named("id".to_string()).to_string(), ":id");
    }

    #[test]
    fn binding_type_is_inferred_from_the_value() {
        assert_eq!(Parameter::from(42).value_type(), ParameterType::Integer);
        assert_eq!(Parameter::from(4.2).value_type(), ParameterType::Float);
        assert_eq!(Parameter::from(true).value_type(), ParameterType::Boolean);
        assert_eq!(Parameter::from("foo").value_type(), ParameterType::String);
        assert_eq!(Parameter::from(Value::NULL).value_type(), ParameterType::Null);
        assert_eq!(
            Parameter::from(vec![0_u8, 1_u8]).value_type(),
            ParameterType::Binary
        );
    }

    #[test]
    fn params_macro_builds_a_positional_collection() {
        let params = params![0 => 15, 1 => "foo"];
        let Parameters::Vec(vec) = params else {
            panic!("expected an owned parameters collection");
        };

        assert_eq!(vec.len(), 2);
        assert_eq!(vec[0].0, ParameterIndex::Positional(0));
        assert_eq!(vec[1].1.value(), &Value::String("foo".to_string()));
    }

    #[test]
    fn empty_params_macro_is_the_no_params_constant() {
        assert!(params![].is_empty());
    }
}
