use crate::driver::connection::{Connection, DriverConnection};
use crate::driver::sqlite;
use crate::driver::statement::Statement;
use crate::error::StdError;
use crate::{AsyncResult, Error, Parameter, Result, TransactionIsolationLevel, Value};
use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;
use std::fmt::{Debug, Formatter};
use url::Url;

pub struct ConnectionOptions {
    path: Option<String>,
    memory: bool,
}

impl ConnectionOptions {
    fn new<T: Into<String>>(dsn: T) -> Result<Self> {
        let dsn = dsn.into();
        if !dsn.starts_with("sqlite:") {
            return Ok(Self::new_with_path(dsn));
        }

        if dsn.starts_with("sqlite://:memory:") {
            return Ok(Self::new_from_memory());
        }

        let url = Url::parse(dsn.as_str())?;
        let path = url.path();

        let mut target = url.domain().unwrap_or("");
        if target.is_empty() {
            target = path;
        }

        Ok(Self::new_with_path(target))
    }

    fn new_with_path<T: Into<String>>(path: T) -> Self {
        ConnectionOptions {
            path: Some(path.into()),
            memory: false,
        }
    }

    fn new_from_memory() -> Self {
        ConnectionOptions {
            path: None,
            memory: true,
        }
    }
}

impl From<&crate::ConnectionOptions> for ConnectionOptions {
    fn from(options: &crate::ConnectionOptions) -> Self {
        match options.file_path.as_deref() {
            None | Some("") | Some(":memory:") => Self::new_from_memory(),
            Some(path) => Self::new_with_path(path),
        }
    }
}

pub struct Driver {
    pub(in crate::driver::sqlite) connection: rusqlite::Connection,
}

impl Driver {
    pub(in crate::driver) fn create_from_options(params: ConnectionOptions) -> Result<Self> {
        let connection = if params.memory {
            rusqlite::Connection::open_in_memory()
        } else {
            rusqlite::Connection::open(params.path.unwrap_or_default())
        }?;

        Ok(Driver { connection })
    }
}

impl Debug for Driver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SQLite Driver").finish()
    }
}

impl DriverConnection<ConnectionOptions> for Driver {
    fn create(params: ConnectionOptions) -> Result<Driver> {
        Self::create_from_options(params)
    }
}

impl<T> DriverConnection<T> for Driver
where
    T: Into<String>,
{
    fn create(params: T) -> Result<Driver> {
        Self::create_from_options(ConnectionOptions::new(params)?)
    }
}

impl<'conn> Connection<'conn> for Driver {
    fn prepare(&'conn self, sql: &str) -> Result<Box<dyn Statement<'conn> + 'conn>> {
        Ok(Box::new(sqlite::statement::Statement::new(self, sql)?))
    }

    fn set_transaction_isolation(
        &'conn self,
        level: TransactionIsolationLevel,
    ) -> AsyncResult<'conn, ()> {
        // SQLite only knows two isolation modes: serializable (the engine
        // default) and read-uncommitted for connections sharing a cache.
        let result = match level {
            TransactionIsolationLevel::ReadUncommitted => self
                .connection
                .execute_batch("PRAGMA read_uncommitted = true")
                .map_err(Error::from),
            TransactionIsolationLevel::Serializable => self
                .connection
                .execute_batch("PRAGMA read_uncommitted = false")
                .map_err(Error::from),
            _ => Err(Error::unsupported_isolation_level(level)),
        };

        Box::pin(async move { result })
    }
}

impl ToSql for Parameter {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>, rusqlite::Error> {
        self.value.to_sql()
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>, rusqlite::Error> {
        Ok(match self {
            Value::NULL => ToSqlOutput::from(rusqlite::types::Null {}),
            Value::Int(value) => ToSqlOutput::from(*value),
            Value::UInt(value) => ToSqlOutput::from(*value as i64),
            Value::String(value) => ToSqlOutput::from(value.clone()),
            Value::Bytes(value) => ToSqlOutput::from(value.clone()),
            Value::Float(value) => ToSqlOutput::from(*value),
            Value::Boolean(value) => ToSqlOutput::from(*value),
            Value::DateTime(value) => {
                ToSqlOutput::Owned(rusqlite::types::Value::Text(value.format("%+").to_string()))
            }
            Value::Json(value) => {
                ToSqlOutput::Owned(rusqlite::types::Value::Text(value.to_string()))
            }
            Value::Uuid(value) => {
                ToSqlOutput::Owned(rusqlite::types::Value::Text(value.to_string()))
            }
            Value::Array(_) => {
                return Err(rusqlite::Error::ToSqlConversionFailure(Box::new(
                    StdError::from(Error::type_mismatch()),
                )))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::driver::connection::{Connection, DriverConnection};
    use crate::driver::sqlite::driver::Driver;
    use crate::driver::statement::Statement as _;
    use crate::{params, Row, TransactionIsolationLevel, Value};
    use std::fs::remove_file;

    #[test]
    fn can_connect() {
        let result: crate::Result<Driver> = Driver::create("sqlite://:memory:");
        assert!(result.is_ok());

        let mut file = std::env::temp_dir();
        file.push("test_temp_db.sqlite");

        let result: crate::Result<Driver> =
            Driver::create(format!("sqlite://{}", file.to_str().unwrap()));
        assert!(result.is_ok());

        #[allow(unused_must_use)]
        {
            remove_file(file.to_str().unwrap());
        }
    }

    #[test]
    fn can_prepare_statements() {
        let connection: Driver = Driver::create("sqlite://:memory:").expect("Must be connected");

        let statement = connection.prepare("SELECT 1");
        assert!(statement.is_ok());
        let statement = connection.prepare("NOT_A_COMMAND 1");
        assert!(statement.is_err());
    }

    #[tokio::test]
    async fn can_query_statements() {
        let connection: Driver = Driver::create("sqlite://:memory:").expect("Must be connected");

        let statement = connection.prepare("SELECT 1 AS one").expect("Prepare failed");
        let result = statement.query(params![]).await.expect("Query must succeed");
        let rows = result.fetch_all().await.expect("Fetch must succeed");
        assert_eq!(
            *rows.first().unwrap(),
            Row::new(vec!["one".to_string()], vec![Value::Int(1)])
        );
    }

    #[tokio::test]
    async fn only_sqlite_isolation_modes_are_supported() {
        let connection: Driver = Driver::create("sqlite://:memory:").expect("Must be connected");

        assert!(connection
            .set_transaction_isolation(TransactionIsolationLevel::ReadUncommitted)
            .await
            .is_ok());
        assert!(connection
            .set_transaction_isolation(TransactionIsolationLevel::Serializable)
            .await
            .is_ok());
        assert!(connection
            .set_transaction_isolation(TransactionIsolationLevel::RepeatableRead)
            .await
            .is_err());
    }
}
