use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, ParameterType, Result, Value};

pub struct IntegerType {}

impl Type for IntegerType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(IntegerType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match &value {
            Value::NULL | Value::Int(_) | Value::UInt(_) => Ok(value),
            Value::String(s) => {
                if let Ok(result) = s.parse() {
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
            Value::NULL | Value::Int(_) => Ok(value.clone()),
            Value::UInt(u) => Ok(Value::Int(i64::try_from(*u)?)),
            Value::String(s) => {
                if let Ok(result) = s.parse() {
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
        super::INTEGER
    }

    fn get_binding_type(&self) -> ParameterType {
        ParameterType::Integer
    }
}
