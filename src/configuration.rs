use crate::ParameterType;

/// Shared configuration of the conversion and mapping layer.
///
/// A single instance is referenced by the connection and passed by reference
/// to the type handlers; handlers never own it.
#[derive(Clone, Debug)]
pub struct Configuration {
    date_time_format: String,
    date_format: String,
    time_format: String,
    null_binding_type: Option<ParameterType>,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            date_time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M:%S".to_string(),
            null_binding_type: None,
        }
    }

    pub fn with_date_time_format(mut self, format: impl Into<String>) -> Self {
        self.date_time_format = format.into();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// The binding type used for NULL parameters which carry no explicit
    /// type. When unset, binding an untyped NULL is an error.
    pub fn with_null_binding_type(mut self, binding_type: Option<ParameterType>) -> Self {
        self.null_binding_type = binding_type;
        self
    }

    pub fn get_date_time_format(&self) -> &str {
        &self.date_time_format
    }

    pub fn get_date_format(&self) -> &str {
        &self.date_format
    }

    pub fn get_time_format(&self) -> &str {
        &self.time_format
    }

    pub fn get_null_binding_type(&self) -> Option<ParameterType> {
        self.null_binding_type
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
