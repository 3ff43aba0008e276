use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, ParameterType, Result, Value};

pub struct BigintType {}

impl Type for BigintType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(BigintType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match &value {
            Value::NULL | Value::Int(_) | Value::UInt(_) => Ok(value),
            Value::String(s) => {
                if let Ok(result) = s.parse::<i64>() {
                    Ok(Value::Int(result))
                } else {
                    Err(Error::conversion_failed_invalid_type(
                        &value,
                        self.get_name(),
                        &["NULL", "Integer"],
                    ))
                }
            }
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "Integer"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Int(_) | Value::UInt(_) => Ok(value.clone()),
            Value::String(s) => {
                if let Ok(result) = s.parse::<i64>() {
                    Ok(Value::Int(result))
                } else {
                    Err(Error::conversion_failed_invalid_type(
                        value,
                        self.get_name(),
                        &["NULL", "Integer"],
                    ))
                }
            }
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Integer"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::BIGINT
    }

    fn get_binding_type(&self) -> ParameterType {
        ParameterType::Integer
    }
}
