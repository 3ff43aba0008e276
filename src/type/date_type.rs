use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, Result, Value};
use chrono::{Local, NaiveDate, TimeZone};

pub struct DateType {}

impl Type for DateType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(DateType {})
    }

    fn convert_to_database_value(
        &self,
        value: Value,
        configuration: &Configuration,
    ) -> Result<Value> {
        match &value {
            Value::NULL => Ok(Value::NULL),
            Value::DateTime(dt) => Ok(Value::String(
                dt.format(configuration.get_date_format()).to_string(),
            )),
            _ => Err(Error::conversion_failed_invalid_type(
                &value,
                self.get_name(),
                &["NULL", "DateTime"],
            )),
        }
    }

    fn convert_to_value(&self, value: &Value, configuration: &Configuration) -> Result<Value> {
        match value {
            Value::NULL | Value::DateTime(_) => Ok(value.clone()),
            Value::String(s) if s.is_empty() => Ok(Value::NULL),
            Value::String(s) => {
                let parsed = NaiveDate::parse_from_str(s, configuration.get_date_format())
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .and_then(|dt| Local.from_local_datetime(&dt).single());
                if let Some(dt) = parsed {
                    Ok(Value::DateTime(dt))
                } else {
                    Err(Error::conversion_failed_invalid_type(
                        value,
                        self.get_name(),
                        &["NULL", "Date"],
                    ))
                }
            }
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Date"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::DATE
    }
}
