use crate::rows::ColumnIndex;
use crate::transaction_isolation_level::TransactionIsolationLevel;
use crate::{ParameterIndex, ParameterType, Value};
use std::backtrace::Backtrace;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    OutOfBoundsError = 1,
    TypeMismatch = 2,
    ConversionFailed = 3,
    UnknownType = 4,
    MissingNullType = 5,
    BindingFailed = 6,
    ExtractionFailed = 7,
    MissingParameter = 8,
    UnknownStatement = 9,
    DuplicateStatement = 10,
    InvalidStatement = 11,
    UnknownDriver = 12,
    NotConnected = 13,
    UnsupportedIsolationLevel = 14,

    UnknownError = -1,
}

pub struct Error {
    kind: ErrorKind,
    inner: Box<dyn std::error::Error + Send + Sync>,
    backtrace: Backtrace,
}

/// An error carrying a context message on top of the failure which caused it.
/// The original error is always reachable through [`std::error::Error::source`].
struct WrappedError {
    message: String,
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl Display for WrappedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. Cause: {}", self.message, self.source)
    }
}

impl Debug for WrappedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for WrappedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

pub struct StdError(Error);

impl Display for StdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.to_string(), f)
    }
}

impl Debug for StdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.to_string(), f)
    }
}

impl std::error::Error for StdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.inner.as_ref())
    }
}

impl From<Error> for StdError {
    fn from(e: Error) -> Self {
        StdError(e)
    }
}

impl Error {
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error {
            kind,
            inner: error.into(),
            backtrace: Backtrace::capture(),
        }
    }

    fn wrap(kind: ErrorKind, message: String, cause: Error) -> Self {
        Self::new(
            kind,
            WrappedError {
                message,
                source: Box::new(StdError(cause)),
            },
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The error which caused this one, if this error translates another
    /// failure (a driver bind error, a conversion error, ...).
    pub fn cause(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }

    pub fn out_of_bounds<T>(index: T) -> Self
    where
        T: ToString,
    {
        Self::new(
            ErrorKind::OutOfBoundsError,
            format!("Unable to read {} index", index.to_string()),
        )
    }

    pub fn type_mismatch() -> Self {
        Self::new(ErrorKind::TypeMismatch, "Type mismatch")
    }

    pub fn conversion_failed_invalid_type(
        value: &Value,
        to_type: &str,
        expected: &[&str],
    ) -> Self {
        Self::new(
            ErrorKind::ConversionFailed,
            format!(
                r#"Could not convert value "{}" to type {}. Expected one of: {}"#,
                value,
                to_type,
                expected.join(", ")
            ),
        )
    }

    pub fn conversion_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConversionFailed, message.into())
    }

    pub fn unknown_type(type_name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownType,
            format!(
                "You have requested a non-existent type {}. Please register it in the type manager before trying to use it",
                type_name
            ),
        )
    }

    pub fn unknown_type_id(type_id: std::any::TypeId) -> Self {
        Self::new(
            ErrorKind::UnknownType,
            format!("You have requested a non-registered type {:?}", type_id),
        )
    }

    pub fn missing_null_type(index: &ParameterIndex) -> Self {
        Self::new(
            ErrorKind::MissingNullType,
            format!(
                "A binding type must be specified for all nullable parameters. No type given for parameter {} and no null binding type is configured",
                index
            ),
        )
    }

    pub fn binding_failed(
        index: &ParameterIndex,
        binding_type: ParameterType,
        cause: Error,
    ) -> Self {
        Self::wrap(
            ErrorKind::BindingFailed,
            format!(
                "Error binding parameter {} with type {}. Try a different binding type for this parameter or a different null binding type configuration",
                index, binding_type
            ),
            cause,
        )
    }

    pub fn extraction_failed(column: &ColumnIndex, cause: Error) -> Self {
        Self::wrap(
            ErrorKind::ExtractionFailed,
            format!("Error attempting to read column {} from the result row", column),
            cause,
        )
    }

    pub fn missing_parameter(name: &str, statement_id: &str) -> Self {
        Self::new(
            ErrorKind::MissingParameter,
            format!(
                r#"No value provided for parameter "{}" of statement "{}""#,
                name, statement_id
            ),
        )
    }

    pub fn unknown_statement(id: &str) -> Self {
        Self::new(
            ErrorKind::UnknownStatement,
            format!(r#"No statement registered with id "{}""#, id),
        )
    }

    pub fn duplicate_statement(id: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateStatement,
            format!(r#"A statement with id "{}" is already registered"#, id),
        )
    }

    pub fn invalid_statement(id: &str, message: impl Display) -> Self {
        Self::new(
            ErrorKind::InvalidStatement,
            format!(r#"Invalid statement "{}": {}"#, id, message),
        )
    }

    pub fn unknown_driver(proto: &str) -> Self {
        Self::new(
            ErrorKind::UnknownDriver,
            format!(r#"Unknown driver for scheme "{}""#, proto),
        )
    }

    pub fn not_connected() -> Self {
        Self::new(ErrorKind::NotConnected, "Connection is not established")
    }

    pub fn unsupported_isolation_level(level: TransactionIsolationLevel) -> Self {
        Self::new(
            ErrorKind::UnsupportedIsolationLevel,
            format!("Isolation level {} is not supported by this driver", level),
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\nBacktrace:\n{}", self.inner, self.backtrace)
    }
}

impl<T> From<T> for Error
where
    T: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn from(err: T) -> Self {
        Error::new(ErrorKind::UnknownError, err)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use crate::{ParameterIndex, ParameterType};

    #[test]
    fn translated_errors_preserve_the_original_cause() {
        let cause = Error::type_mismatch();
        let error = Error::binding_failed(
            &ParameterIndex::Positional(3),
            ParameterType::Integer,
            cause,
        );

        assert_eq!(error.kind(), ErrorKind::BindingFailed);
        let source = error.cause().expect("cause must be preserved");
        assert_eq!(source.to_string(), "Type mismatch");
    }

    #[test]
    fn translated_errors_carry_positional_context() {
        let error = Error::binding_failed(
            &ParameterIndex::Named("id".to_string()),
            ParameterType::String,
            Error::type_mismatch(),
        );

        let message = error.to_string();
        assert!(message.contains(":id"));
        assert!(message.contains("Cause: Type mismatch"));
    }

    #[test]
    fn foreign_errors_are_wrapped_as_unknown() {
        let error = Error::from("something went wrong");
        assert_eq!(error.kind(), ErrorKind::UnknownError);
        assert_eq!(error.to_string(), "something went wrong");
    }
}
