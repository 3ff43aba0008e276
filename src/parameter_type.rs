use std::fmt::{Display, Formatter};

/// Binding type of a statement parameter.
///
/// This is the type tag the driver receives alongside the value, and the tag
/// a typed NULL is bound with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParameterType {
    Null = 0,
    Integer = 1,
    String = 2,
    LargeObject = 3,
    Float = 4,
    Boolean = 5,
    Binary = 16,
    Ascii = 17,
}

impl Display for ParameterType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParameterType::Null => "NULL",
            ParameterType::Integer => "INTEGER",
            ParameterType::String => "STRING",
            ParameterType::LargeObject => "LARGE_OBJECT",
            ParameterType::Float => "FLOAT",
            ParameterType::Boolean => "BOOLEAN",
            ParameterType::Binary => "BINARY",
            ParameterType::Ascii => "ASCII",
        };

        write!(f, "{}", name)
    }
}
