mod configuration;
mod connection;
mod connection_options;
pub mod driver;
pub mod error;
pub mod mapper;
mod parameter;
mod parameter_type;
mod private;
mod result;
mod rows;
mod transaction_isolation_level;
pub mod r#type;
mod value;

pub use atlas_macros::{values, FromRow};
pub use configuration::Configuration;
pub use connection::Connection;
pub use connection_options::ConnectionOptions;
pub use error::Error;
pub use mapper::{FromRow, MappedStatement, SqlMap, StatementKind};
pub use parameter::Parameter;
pub use parameter::ParameterIndex;
pub use parameter::Parameters;
pub use parameter::NO_PARAMS;
pub use parameter_type::ParameterType;
pub use result::{Async, AsyncResult, Result};
pub use rows::{ColumnIndex, Row, Rows};
pub use transaction_isolation_level::TransactionIsolationLevel;
pub use value::{TypedValue, TypedValueMap, UntypedValueMap, Value, ValueMap};
