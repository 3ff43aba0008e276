use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, ParameterType, Result, Value};

pub struct FloatType {}

impl Type for FloatType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(FloatType {})
    }

    fn convert_to_database_value(&self, value: Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Float(_) => Ok(value),
            Value::Int(i) => Ok(Value::Float(i as f64)),
            Value::UInt(u) => Ok(Value::Float(u as f64)),
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "Float"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, _: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::Float(_) => Ok(value.clone()),
            Value::Int(i) => Ok(Value::Float(*i as f64)),
            Value::UInt(u) => Ok(Value::Float(*u as f64)),
            Value::String(s) => {
                if let Ok(result) = s.parse() {
                    Ok(Value::Float(result))
                } else {
                    Err(Error::conversion_failed_invalid_type(
                        value,
                        self.get_name(),
                        &["NULL", "Float"],
                    ))
                }
            }
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Float"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::FLOAT
    }

    fn get_binding_type(&self) -> ParameterType {
        ParameterType::Float
    }
}
