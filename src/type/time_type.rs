use crate::configuration::Configuration;
use crate::r#type::Type;
use crate::{Error, Result, Value};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub struct TimeType {}

impl Type for TimeType {
    fn default() -> Box<dyn Type + Sync + Send> {
        Box::new(TimeType {})
    }

    fn convert_to_database_value(
        &self,
        value: Value,
        configuration: &Configuration,
    ) -> Result<Value> {
        match &value {
            Value::NULL => Ok(Value::NULL),
            Value::DateTime(dt) => Ok(Value::String(
                dt.format(configuration.get_time_format()).to_string(),
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
                // times are anchored to the epoch date, only the time of day
                // is meaningful
                let parsed = NaiveTime::parse_from_str(s, configuration.get_time_format())
                    .ok()
                    .map(|time| {
                        NaiveDateTime::new(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(), time)
                    })
                    .and_then(|dt| Local.from_local_datetime(&dt).single());
                if let Some(dt) = parsed {
                    Ok(Value::DateTime(dt))
                } else {
                    Err(Error::conversion_failed_invalid_type(
                        value,
                        self.get_name(),
                        &["NULL", "Time"],
                    ))
                }
            }
            _ => Err(Error::conversion_failed_invalid_type(
                value,
                self.get_name(),
                &["NULL", "Time"],
            )),
        }
    }

    fn get_name(&self) -> &'static str {
        super::TIME
    }
}
