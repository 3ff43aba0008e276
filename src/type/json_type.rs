use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, Result, Value};

pub struct JsonType {}

impl Type for JsonType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(JsonType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::String(_) => Ok(value),
            Value::Json(json) => Ok(Value::String(json.to_string())),
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "Json", "String"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Json(_) => Ok(value.clone()),
            Value::String(s) if s.is_empty() => Ok(Value::NULL),
            Value::String(s) => {
                if let Ok(json) = serde_json::from_str(s) {
                    Ok(Value::Json(json))
                } else {
                    Err(Error::conversion_failed_invalid_type(
                        value,
                        self.get_name(),
                        &["NULL", "Json"],
                    ))
                }
            }
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Json"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::JSON
    }
}
