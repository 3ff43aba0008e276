use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, Result, Value};
use itertools::Itertools;

/// Array type which can be used for simple values.
/// Only use this type if you are sure that your values cannot contain a ",".
pub struct SimpleArrayType {}

impl Type for SimpleArrayType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(SimpleArrayType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL => Ok(Value::NULL),
            Value::Array(vec) => Ok(Value::String(vec.iter().map(ToString::to_string).join(","))),
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "Array"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Array(_) => Ok(value.clone()),
            Value::String(s) if s.is_empty() => Ok(Value::NULL),
            Value::String(s) => Ok(Value::Array(
                s.split(',').map(|v| Value::String(v.to_string())).collect(),
            )),
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Array"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::SIMPLE_ARRAY
    }
}
