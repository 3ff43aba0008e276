use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, ParameterType, Result, Value};

/// Fixed-point decimal values are carried as strings to avoid any precision
/// loss in the binary float representation.
pub struct DecimalType {}

impl Type for DecimalType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(DecimalType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::String(_) => Ok(value),
            Value::Int(i) => Ok(Value::String(i.to_string())),
            Value::UInt(u) => Ok(Value::String(u.to_string())),
            Value::Float(f) => Ok(Value::String(f.to_string())),
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
            Value::Int(i) => Ok(Value::String(i.to_string())),
            Value::UInt(u) => Ok(Value::String(u.to_string())),
            Value::Float(f) => Ok(Value::String(f.to_string())),
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "String"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::DECIMAL
    }

    fn get_binding_type(&self) -> ParameterType {
        ParameterType::String
    }
}
