use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, ParameterType, Result, Value};

pub struct BinaryType {}

impl Type for BinaryType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(BinaryType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Bytes(_) => Ok(value),
            Value::String(s) => Ok(Value::Bytes(s.into_bytes())),
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "Bytes"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Bytes(_) => Ok(value.clone()),
            Value::String(s) => Ok(Value::Bytes(s.clone().into_bytes())),
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Bytes"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::BINARY
    }

    fn get_binding_type(&self) -> ParameterType {
        ParameterType::Binary
    }
}
