use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, ParameterType, Result, Value};

pub struct BlobType {}

impl Type for BlobType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(BlobType {})
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
        super::BLOB
    }

    fn get_binding_type(&self) -> ParameterType {
        ParameterType::LargeObject
    }
}
