use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, ParameterType, Result, Value};

pub struct StringType {}

impl Type for StringType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(StringType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match &value {
            Value::NULL | Value::String(_) => Ok(value),
            Value::Int(_) | Value::UInt(_) | Value::Float(_) | Value::Boolean(_) | Value::Uuid(_) => {
                Ok(Value::String(value.to_string()))
            }
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "String"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::String(_) => Ok(value.clone()),
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => {
                Ok(Value::String(value.to_string()))
            }
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "String"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::STRING
    }
}
