use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, ParameterType, Result, Value};

pub struct BooleanType {}

impl Type for BooleanType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(BooleanType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Boolean(_) => Ok(value),
            Value::Int(0) | Value::UInt(0) => Ok(Value::Boolean(false)),
            Value::Int(1) | Value::UInt(1) => Ok(Value::Boolean(true)),
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "Boolean"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Boolean(_) => Ok(value.clone()),
            Value::Int(0) | Value::UInt(0) => Ok(Value::Boolean(false)),
            Value::Int(1) | Value::UInt(1) => Ok(Value::Boolean(true)),
            Value::String(s) if s == "0" || s == "false" => Ok(Value::Boolean(false)),
            Value::String(s) if s == "1" || s == "true" => Ok(Value::Boolean(true)),
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Boolean", "Int", "String"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::BOOLEAN
    }

    fn get_binding_type(&self) -> ParameterType {
        ParameterType::Boolean
    }
}
