mod bigint_type;
mod binary_type;
mod blob_type;
mod boolean_type;
mod date_type;
mod datetime_type;
mod decimal_type;
mod float_type;
mod guid_type;
mod integer_type;
mod json_type;
mod simple_array_type;
mod string_type;
mod text_type;
mod time_type;

use crate::configuration::Configuration;
use crate::driver::statement::Statement;
use crate::rows::ColumnIndex;
use crate::{Error, Parameter, ParameterIndex, ParameterType, Result, Row, Value};
pub use bigint_type::BigintType;
pub use binary_type::BinaryType;
pub use blob_type::BlobType;
pub use boolean_type::BooleanType;
use dashmap::DashMap;
pub use date_type::DateType;
pub use datetime_type::DateTimeType;
pub use decimal_type::DecimalType;
pub use float_type::FloatType;
pub use guid_type::GuidType;
pub use integer_type::IntegerType;
pub use json_type::JsonType;
use lazy_static::lazy_static;
pub use simple_array_type::SimpleArrayType;
use std::any::{type_name, TypeId};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
pub use string_type::StringType;
pub use text_type::TextType;
pub use time_type::TimeType;

pub const BIGINT: &str = "bigint";
pub const BINARY: &str = "binary";
pub const BLOB: &str = "blob";
pub const BOOLEAN: &str = "boolean";
pub const DATE: &str = "date";
pub const DATETIME: &str = "datetime";
pub const DECIMAL: &str = "decimal";
pub const FLOAT: &str = "float";
pub const GUID: &str = "guid";
pub const INTEGER: &str = "integer";
pub const JSON: &str = "json";
pub const SIMPLE_ARRAY: &str = "simple_array";
pub const STRING: &str = "string";
pub const TEXT: &str = "text";
pub const TIME: &str = "time";

pub trait AsTypeId {
    fn type_id(&self) -> TypeId;
}

/// Shared handle to a registered type handler.
///
/// The handle exposes the type-specific conversion overrides and, on top of
/// them, the two template operations every handler shares: binding a
/// parameter ([`TypePtr::bind_parameter`]) and reading a result column
/// ([`TypePtr::extract_column`]). The templates own the null-handling and
/// the error translation; the overrides only ever see the non-null work.
#[derive(Clone)]
pub struct TypePtr {
    t: Arc<Box<dyn Type + Send + Sync>>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Debug for TypePtr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypePtr")
            .field("type_id", &self.type_id)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl PartialEq for TypePtr {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl TypePtr {
    fn new<T: Type + Send + Sync + 'static>() -> Self {
        Self {
            t: Arc::new(T::default()),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    delegate::delegate! {
        to(**(self.t)) {
            pub fn convert_to_database_value(
                &self,
                value: Value,
                configuration: &Configuration,
            ) -> Result<Value>;
            pub fn convert_to_value(&self, value: &Value, configuration: &Configuration) -> Result<Value>;
            pub fn get_name(&self) -> &'static str;
            pub fn get_binding_type(&self) -> ParameterType;
        }
    }

    /// Binds `value` to the placeholder identified by `index`.
    ///
    /// A NULL value is bound as a typed null using `null_type`; when no type
    /// has been given for it, a [`ErrorKind::MissingNullType`] error is
    /// returned and nothing is bound. Non-null values go through the
    /// handler's conversion override. Any conversion or driver failure is
    /// translated into a [`ErrorKind::BindingFailed`] error carrying the
    /// parameter index, the binding type and the original cause.
    ///
    /// [`ErrorKind::MissingNullType`]: crate::error::ErrorKind
    /// [`ErrorKind::BindingFailed`]: crate::error::ErrorKind
    pub fn bind_parameter(
        &self,
        statement: &dyn Statement<'_>,
        index: &ParameterIndex,
        value: Value,
        null_type: Option<ParameterType>,
        configuration: &Configuration,
    ) -> Result<()> {
        if value.is_null() {
            let Some(binding_type) = null_type else {
                return Err(Error::missing_null_type(index));
            };

            statement
                .bind_value(index.clone(), Parameter::new(Value::NULL, binding_type))
                .map_err(|e| Error::binding_failed(index, binding_type, e))
        } else {
            let binding_type = self.get_binding_type();
            self.convert_to_database_value(value, configuration)
                .and_then(|converted| {
                    statement.bind_value(index.clone(), Parameter::new(converted, binding_type))
                })
                .map_err(|e| Error::binding_failed(index, binding_type, e))
        }
    }

    /// Reads the column identified by `column` out of `row`.
    ///
    /// The raw value goes through the handler's conversion override; if the
    /// raw value is NULL the result is normalized to [`Value::NULL`] no
    /// matter what the override returned. Failures (a missing column, a
    /// conversion error) are translated into a
    /// [`ErrorKind::ExtractionFailed`] error carrying the column context and
    /// the original cause.
    ///
    /// [`ErrorKind::ExtractionFailed`]: crate::error::ErrorKind
    pub fn extract_column(
        &self,
        row: &Row,
        column: &ColumnIndex,
        configuration: &Configuration,
    ) -> Result<Value> {
        let extracted = row.get(column.clone()).and_then(|raw| {
            let converted = self.convert_to_value(raw, configuration)?;
            Ok((raw.is_null(), converted))
        });

        match extracted {
            Ok((true, _)) => Ok(Value::NULL),
            Ok((false, value)) => Ok(value),
            Err(e) => Err(Error::extraction_failed(column, e)),
        }
    }
}

impl AsTypeId for TypePtr {
    fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl AsTypeId for TypeId {
    fn type_id(&self) -> TypeId {
        *self
    }
}

pub trait Type {
    fn default() -> Box<dyn Type + Sync + Send>
    where
        Self: Sized;

    /// Converts a non-null value to the database representation of this
    /// type.
    #[allow(unused_variables)]
    fn convert_to_database_value(
        &self,
        value: Value,
        configuration: &Configuration,
    ) -> Result<Value> {
        Ok(value)
    }

    /// Converts a raw column value to the in-memory representation of this
    /// type.
    #[allow(unused_variables)]
    fn convert_to_value(&self, value: &Value, configuration: &Configuration) -> Result<Value> {
        Ok(value.clone())
    }

    fn get_name(&self) -> &'static str;

    fn get_binding_type(&self) -> ParameterType {
        ParameterType::String
    }
}

pub trait IntoType {
    fn into_type(self) -> Result<TypePtr>;
}

impl IntoType for &str {
    fn into_type(self) -> Result<TypePtr> {
        TypeManager::get_instance().get_type_by_name(self)
    }
}

impl IntoType for &String {
    fn into_type(self) -> Result<TypePtr> {
        TypeManager::get_instance().get_type_by_name(self)
    }
}

impl IntoType for TypeId {
    fn into_type(self) -> Result<TypePtr> {
        TypeManager::get_instance().get_type(self)
    }
}

impl<T: Type + Send + Sync + 'static> IntoType for T {
    fn into_type(self) -> Result<TypePtr> {
        TypeManager::get_instance().get_type(TypePtr::new::<Self>())
    }
}

impl IntoType for TypePtr {
    fn into_type(self) -> Result<TypePtr> {
        Ok(self)
    }
}

pub struct TypeManager {
    type_map: DashMap<TypeId, TypePtr>,
}

lazy_static! {
    static ref TYPE_MANAGER_INSTANCE: TypeManager = TypeManager::new();
}

impl TypeManager {
    fn new() -> Self {
        let type_map = DashMap::new();
        type_map.insert(TypeId::of::<BigintType>(), TypePtr::new::<BigintType>());
        type_map.insert(TypeId::of::<BinaryType>(), TypePtr::new::<BinaryType>());
        type_map.insert(TypeId::of::<BlobType>(), TypePtr::new::<BlobType>());
        type_map.insert(TypeId::of::<BooleanType>(), TypePtr::new::<BooleanType>());
        type_map.insert(TypeId::of::<DateType>(), TypePtr::new::<DateType>());
        type_map.insert(TypeId::of::<DateTimeType>(), TypePtr::new::<DateTimeType>());
        type_map.insert(TypeId::of::<DecimalType>(), TypePtr::new::<DecimalType>());
        type_map.insert(TypeId::of::<FloatType>(), TypePtr::new::<FloatType>());
        type_map.insert(TypeId::of::<GuidType>(), TypePtr::new::<GuidType>());
        type_map.insert(TypeId::of::<IntegerType>(), TypePtr::new::<IntegerType>());
        type_map.insert(TypeId::of::<JsonType>(), TypePtr::new::<JsonType>());
        type_map.insert(
            TypeId::of::<SimpleArrayType>(),
            TypePtr::new::<SimpleArrayType>(),
        );
        type_map.insert(TypeId::of::<StringType>(), TypePtr::new::<StringType>());
        type_map.insert(TypeId::of::<TextType>(), TypePtr::new::<TextType>());
        type_map.insert(TypeId::of::<TimeType>(), TypePtr::new::<TimeType>());

        Self { type_map }
    }

    pub fn register<T: Type + Send + Sync + 'static>(&self) {
        self.type_map.insert(TypeId::of::<T>(), TypePtr::new::<T>());
    }

    pub fn get_instance() -> &'static Self {
        &TYPE_MANAGER_INSTANCE
    }

    pub fn get_type_by_name(&self, type_name: &str) -> Result<TypePtr> {
        self.type_map
            .iter()
            .find(|t| t.get_name() == type_name)
            .map(|r| r.value().clone())
            .ok_or_else(|| Error::unknown_type(type_name))
    }

    pub fn get_type<T: AsTypeId>(&self, r#type: T) -> Result<TypePtr> {
        let type_id = r#type.type_id();
        self.type_map
            .get(&type_id)
            .map(|r| r.value().clone())
            .ok_or_else(|| Error::unknown_type_id(type_id))
    }

    pub fn get_types(&self) -> Result<Vec<TypeId>> {
        Ok(self.type_map.iter().map(|t| *t.key()).collect())
    }

    /// The handler conventionally associated with the given value, used when
    /// a statement placeholder declares no type.
    pub fn get_type_for_value(&self, value: &Value) -> Result<TypePtr> {
        let name = match value {
            Value::NULL | Value::String(_) => STRING,
            Value::Int(_) => INTEGER,
            Value::UInt(_) => BIGINT,
            Value::Float(_) => FLOAT,
            Value::Boolean(_) => BOOLEAN,
            Value::Bytes(_) => BINARY,
            Value::DateTime(_) => DATETIME,
            Value::Json(_) => JSON,
            Value::Uuid(_) => GUID,
            Value::Array(_) => SIMPLE_ARRAY,
        };

        self.get_type_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Type, TypeManager, TypePtr};
    use crate::configuration::Configuration;
    use crate::driver::statement::Statement;
    use crate::driver::statement_result::StatementResult;
    use crate::error::ErrorKind;
    use crate::rows::ColumnIndex;
    use crate::{
        AsyncResult, Error, Parameter, ParameterIndex, ParameterType, Parameters, Result, Row,
        Value,
    };
    use std::cell::RefCell;

    struct RecordingStatement {
        binds: RefCell<Vec<(ParameterIndex, Parameter)>>,
        failing: bool,
    }

    impl RecordingStatement {
        fn new() -> Self {
            Self {
                binds: RefCell::new(vec![]),
                failing: false,
            }
        }

        fn failing() -> Self {
            Self {
                binds: RefCell::new(vec![]),
                failing: true,
            }
        }
    }

    impl<'conn> Statement<'conn> for RecordingStatement {
        fn bind_value(&self, param: ParameterIndex, value: Parameter) -> Result<()> {
            if self.failing {
                return Err(Error::type_mismatch());
            }

            self.binds.borrow_mut().push((param, value));
            Ok(())
        }

        fn query(&self, _: Parameters) -> AsyncResult<'_, StatementResult> {
            unimplemented!()
        }

        fn query_owned(
            self: Box<Self>,
            _: Vec<(ParameterIndex, Parameter)>,
        ) -> AsyncResult<'conn, StatementResult> {
            unimplemented!()
        }

        fn execute(&self, _: Parameters) -> AsyncResult<'_, usize> {
            unimplemented!()
        }

        fn execute_owned(
            self: Box<Self>,
            _: Vec<(ParameterIndex, Parameter)>,
        ) -> AsyncResult<'conn, usize> {
            unimplemented!()
        }

        fn row_count(&self) -> usize {
            0
        }
    }

    /// A handler whose overrides misbehave on purpose: converting to the
    /// database representation always fails, converting back always returns
    /// a non-null integer.
    struct ProbeType {}

    impl Type for ProbeType {
        fn default() -> Box<dyn Type + Sync + Send> {
            Box::new(ProbeType {})
        }

        fn convert_to_database_value(
            &self,
            _: Value,
            _: &Configuration,
        ) -> Result<Value> {
            Err(Error::conversion_failed("probe conversion refused"))
        }

        fn convert_to_value(&self, _: &Value, _: &Configuration) -> Result<Value> {
            Ok(Value::Int(42))
        }

        fn get_name(&self) -> &'static str {
            "probe"
        }

        fn get_binding_type(&self) -> ParameterType {
            ParameterType::Integer
        }
    }

    #[test]
    fn binding_null_without_a_type_fails() {
        let statement = RecordingStatement::new();
        let handler = TypePtr::new::<ProbeType>();
        let configuration = Configuration::default();

        let result = handler.bind_parameter(
            &statement,
            &ParameterIndex::Positional(0),
            Value::NULL,
            None,
            &configuration,
        );

        let error = result.expect_err("binding an untyped NULL must fail");
        assert_eq!(error.kind(), ErrorKind::MissingNullType);
        assert!(statement.binds.borrow().is_empty());
    }

    #[test]
    fn binding_null_with_a_type_binds_a_typed_null_without_converting() {
        let statement = RecordingStatement::new();
        let handler = TypePtr::new::<ProbeType>();
        let configuration = Configuration::default();

        handler
            .bind_parameter(
                &statement,
                &ParameterIndex::Positional(0),
                Value::NULL,
                Some(ParameterType::String),
                &configuration,
            )
            .expect("the conversion override must not run for NULL values");

        let binds = statement.binds.borrow();
        assert_eq!(binds.len(), 1);
        assert_eq!(binds[0].1.value(), &Value::NULL);
        assert_eq!(binds[0].1.value_type(), ParameterType::String);
    }

    #[test]
    fn binding_failures_are_translated_with_context_and_cause() {
        let statement = RecordingStatement::failing();
        let handler = TypePtr::new::<ProbeType>();
        let configuration = Configuration::default();

        let error = handler
            .bind_parameter(
                &statement,
                &ParameterIndex::Positional(7),
                Value::NULL,
                Some(ParameterType::Integer),
                &configuration,
            )
            .expect_err("the driver failure must surface");

        assert_eq!(error.kind(), ErrorKind::BindingFailed);
        assert!(error.to_string().contains("#7"));
        assert!(error.cause().is_some());
    }

    #[test]
    fn conversion_failures_are_translated_with_context_and_cause() {
        let statement = RecordingStatement::new();
        let handler = TypePtr::new::<ProbeType>();
        let configuration = Configuration::default();

        let error = handler
            .bind_parameter(
                &statement,
                &ParameterIndex::Positional(1),
                Value::Int(3),
                None,
                &configuration,
            )
            .expect_err("the probe conversion always fails");

        assert_eq!(error.kind(), ErrorKind::BindingFailed);
        assert!(error.cause().unwrap().to_string().contains("probe conversion refused"));
        assert!(statement.binds.borrow().is_empty());
    }

    #[test]
    fn extraction_normalizes_null_columns_regardless_of_the_override() {
        let handler = TypePtr::new::<ProbeType>();
        let configuration = Configuration::default();
        let row = Row::new(vec!["a".to_string()], vec![Value::NULL]);

        let value = handler
            .extract_column(&row, &ColumnIndex::Position(0), &configuration)
            .unwrap();

        // the override returned Int(42); the raw NULL wins
        assert_eq!(value, Value::NULL);
    }

    #[test]
    fn extraction_returns_the_converted_value_for_non_null_columns() {
        let handler = TypePtr::new::<ProbeType>();
        let configuration = Configuration::default();
        let row = Row::new(vec!["a".to_string()], vec![Value::String("x".to_string())]);

        let value = handler
            .extract_column(&row, &ColumnIndex::Position(0), &configuration)
            .unwrap();

        assert_eq!(value, Value::Int(42));
    }

    #[test]
    fn extraction_failures_carry_the_column_context() {
        let handler = TypePtr::new::<ProbeType>();
        let configuration = Configuration::default();
        let row = Row::new(vec!["a".to_string()], vec![Value::NULL]);

        let error = handler
            .extract_column(&row, &ColumnIndex::Name("missing".to_string()), &configuration)
            .expect_err("the column does not exist");

        assert_eq!(error.kind(), ErrorKind::ExtractionFailed);
        assert!(error.to_string().contains("missing"));
        assert!(error.cause().is_some());
    }

    #[test]
    fn the_manager_resolves_registered_types_by_name() {
        let manager = TypeManager::get_instance();
        assert_eq!(manager.get_type_by_name("integer").unwrap().get_name(), "integer");
        assert_eq!(manager.get_type_by_name("datetime").unwrap().get_name(), "datetime");

        let error = manager.get_type_by_name("no_such_type").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownType);
    }

    #[test]
    fn the_manager_infers_a_handler_from_the_value() {
        let manager = TypeManager::get_instance();
        assert_eq!(
            manager.get_type_for_value(&Value::Int(1)).unwrap().get_name(),
            "integer"
        );
        assert_eq!(
            manager.get_type_for_value(&Value::Boolean(true)).unwrap().get_name(),
            "boolean"
        );
        assert_eq!(
            manager.get_type_for_value(&Value::NULL).unwrap().get_name(),
            "string"
        );
    }
}
