use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, Result, Value};

pub struct GuidType {}

impl Type for GuidType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(GuidType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::String(_) => Ok(value),
            Value::Uuid(uuid) => Ok(Value::String(uuid.to_string())),
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "String", "Uuid"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Uuid(_) => Ok(value.clone()),
            Value::String(s) if s.is_empty() => Ok(Value::NULL),
            Value::String(s) => {
                if let Ok(uuid) = uuid::Uuid::parse_str(s) {
                    Ok(Value::Uuid(uuid))
                } else {
                    Err(Error::conversion_failed_invalid_type(
                        value,
                        self.get_name(),
                        &["NULL", "Uuid"],
                    ))
                }
            }
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Uuid"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::GUID
    }
}
