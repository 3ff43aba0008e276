use crate::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// ANSI transaction isolation levels.
///
/// Each level carries the numeric code assigned to it by the JDBC standard,
/// so that the values can interoperate with any driver or tool speaking that
/// convention.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TransactionIsolationLevel {
    /// Transactions are not supported.
    None,
    /// Dirty reads, non-repeatable reads and phantom reads can occur.
    ReadUncommitted,
    /// Dirty reads are prevented; non-repeatable reads and phantom reads can
    /// occur.
    ReadCommitted,
    /// Dirty reads and non-repeatable reads are prevented; phantom reads can
    /// occur.
    RepeatableRead,
    /// Dirty reads, non-repeatable reads and phantom reads are prevented.
    Serializable,
}

impl TransactionIsolationLevel {
    /// The numeric code of this isolation level.
    pub const fn level(&self) -> u8 {
        match self {
            TransactionIsolationLevel::None => 0,
            TransactionIsolationLevel::ReadUncommitted => 1,
            TransactionIsolationLevel::ReadCommitted => 2,
            TransactionIsolationLevel::RepeatableRead => 4,
            TransactionIsolationLevel::Serializable => 8,
        }
    }
}

impl Display for TransactionIsolationLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransactionIsolationLevel::None => "NONE",
            TransactionIsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            TransactionIsolationLevel::ReadCommitted => "READ COMMITTED",
            TransactionIsolationLevel::RepeatableRead => "REPEATABLE READ",
            TransactionIsolationLevel::Serializable => "SERIALIZABLE",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for TransactionIsolationLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('_', " ").as_str() {
            "NONE" => Ok(TransactionIsolationLevel::None),
            "READ UNCOMMITTED" => Ok(TransactionIsolationLevel::ReadUncommitted),
            "READ COMMITTED" => Ok(TransactionIsolationLevel::ReadCommitted),
            "REPEATABLE READ" => Ok(TransactionIsolationLevel::RepeatableRead),
            "SERIALIZABLE" => Ok(TransactionIsolationLevel::Serializable),
            _ => Err(Error::conversion_failed(format!(
                r#""{}" is not a transaction isolation level"#,
                s
            ))),
        }
    }
}

impl TryFrom<u8> for TransactionIsolationLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TransactionIsolationLevel::None),
            1 => Ok(TransactionIsolationLevel::ReadUncommitted),
            2 => Ok(TransactionIsolationLevel::ReadCommitted),
            4 => Ok(TransactionIsolationLevel::RepeatableRead),
            8 => Ok(TransactionIsolationLevel::Serializable),
            _ => Err(Error::conversion_failed(format!(
                "{} is not a transaction isolation level code",
                value
            ))),
        }
    }
}
