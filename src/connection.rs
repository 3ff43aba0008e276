use crate::driver::statement::Statement;
use crate::driver::statement_result::StatementResult;
use crate::driver::Driver;
use crate::parameter::NO_PARAMS;
use crate::r#type::IntoType;
use crate::{
    Configuration, ConnectionOptions, Error, Parameters, Result, TransactionIsolationLevel, Value,
};
use log::debug;
use std::sync::Arc;

#[derive(Debug)]
pub struct Connection {
    connection_options: ConnectionOptions,
    configuration: Arc<Configuration>,
    driver: Option<Arc<Driver>>,
}

impl Connection {
    pub fn create(
        connection_options: ConnectionOptions,
        configuration: Option<Configuration>,
    ) -> Self {
        Self {
            connection_options,
            configuration: Arc::new(configuration.unwrap_or_default()),
            driver: None,
        }
    }

    pub fn create_from_dsn(dsn: &str, configuration: Option<Configuration>) -> Result<Self> {
        Ok(Self::create(
            ConnectionOptions::try_from(dsn)?,
            configuration,
        ))
    }

    pub fn is_connected(&self) -> bool {
        self.driver.is_some()
    }

    pub async fn connect(mut self) -> Result<Self> {
        if self.driver.is_some() {
            return Ok(self);
        }

        debug!(
            "connecting to {} database",
            self.connection_options.scheme.as_deref().unwrap_or("?")
        );
        let driver = Arc::new(Driver::create(&self.connection_options).await?);
        let _ = self.driver.insert(driver);

        Ok(self)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn prepare(&self, sql: &str) -> Result<Box<dyn Statement<'_> + '_>> {
        let driver = self.driver.as_ref().ok_or_else(Error::not_connected)?;
        driver.prepare(sql)
    }

    /// Executes an SQL statement, returning the produced result set.
    pub async fn query(&self, sql: &str, params: Parameters<'_>) -> Result<StatementResult> {
        let driver = self.driver.as_ref().ok_or_else(Error::not_connected)?;
        driver.query(sql, params).await
    }

    /// Executes an SQL statement, returning the number of affected rows.
    pub async fn execute(&self, sql: &str, params: Parameters<'_>) -> Result<usize> {
        let driver = self.driver.as_ref().ok_or_else(Error::not_connected)?;
        driver.execute(sql, params).await
    }

    pub async fn begin_transaction(&self) -> Result<()> {
        debug!("beginning transaction");
        self.execute("BEGIN", NO_PARAMS).await.map(|_| ())
    }

    /// Starts a transaction after applying the given isolation level to the
    /// session.
    pub async fn begin_transaction_with(
        &self,
        isolation_level: TransactionIsolationLevel,
    ) -> Result<()> {
        let driver = self.driver.as_ref().ok_or_else(Error::not_connected)?;
        driver.set_transaction_isolation(isolation_level).await?;

        debug!("beginning {} transaction", isolation_level);
        self.execute("BEGIN", NO_PARAMS).await.map(|_| ())
    }

    pub async fn commit(&self) -> Result<()> {
        self.execute("COMMIT", NO_PARAMS).await.map(|_| ())
    }

    pub async fn roll_back(&self) -> Result<()> {
        self.execute("ROLLBACK", NO_PARAMS).await.map(|_| ())
    }

    /// Converts a raw column value to its in-memory representation through
    /// the given type handler.
    pub fn convert_value<T: IntoType>(&self, value: &Value, column_type: T) -> Result<Value> {
        column_type
            .into_type()?
            .convert_to_value(value, &self.configuration)
    }

    /// Converts an in-memory value to its database representation through
    /// the given type handler.
    pub fn convert_database_value<T: IntoType>(
        &self,
        value: Value,
        column_type: T,
    ) -> Result<Value> {
        column_type
            .into_type()?
            .convert_to_database_value(value, &self.configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::Connection;
    use crate::error::ErrorKind;
    use crate::{params, Value};

    #[tokio::test]
    async fn querying_a_disconnected_connection_fails() {
        let connection = Connection::create_from_dsn("sqlite://:memory:", None).unwrap();
        assert!(!connection.is_connected());

        let error = connection.query("SELECT 1", params![]).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotConnected);
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn statements_can_be_executed_and_queried() {
        let connection = Connection::create_from_dsn("sqlite://:memory:", None)
            .unwrap()
            .connect()
            .await
            .unwrap();

        connection
            .execute("CREATE TABLE t (id INTEGER, label VARCHAR(32))", params![])
            .await
            .unwrap();
        let affected = connection
            .execute(
                "INSERT INTO t (id, label) VALUES (?, ?)",
                params![0 => 1, 1 => "one"],
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let mut result = connection
            .query("SELECT label FROM t WHERE id = ?", params![0 => 1])
            .await
            .unwrap();
        let row = result.fetch_one().await.unwrap().unwrap();
        assert_eq!(row.get("label").unwrap(), &Value::String("one".to_string()));
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn transactions_can_be_committed_and_rolled_back() {
        let connection = Connection::create_from_dsn("sqlite://:memory:", None)
            .unwrap()
            .connect()
            .await
            .unwrap();
        connection
            .execute("CREATE TABLE t (id INTEGER)", params![])
            .await
            .unwrap();

        connection.begin_transaction().await.unwrap();
        connection
            .execute("INSERT INTO t (id) VALUES (1)", params![])
            .await
            .unwrap();
        connection.roll_back().await.unwrap();

        connection.begin_transaction().await.unwrap();
        connection
            .execute("INSERT INTO t (id) VALUES (2)", params![])
            .await
            .unwrap();
        connection.commit().await.unwrap();

        let rows = connection
            .query("SELECT id FROM t", params![])
            .await
            .unwrap()
            .fetch_all()
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(0).unwrap(), &Value::Int(2));
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn isolation_level_is_applied_before_the_transaction_starts() {
        let connection = Connection::create_from_dsn("sqlite://:memory:", None)
            .unwrap()
            .connect()
            .await
            .unwrap();

        connection
            .begin_transaction_with(crate::TransactionIsolationLevel::ReadUncommitted)
            .await
            .unwrap();
        connection.roll_back().await.unwrap();

        let error = connection
            .begin_transaction_with(crate::TransactionIsolationLevel::RepeatableRead)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedIsolationLevel);
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn values_are_converted_through_the_type_handlers() {
        let connection = Connection::create_from_dsn("sqlite://:memory:", None)
            .unwrap()
            .connect()
            .await
            .unwrap();

        let converted = connection
            .convert_value(&Value::String("1".to_string()), "boolean")
            .unwrap();
        assert_eq!(converted, Value::Boolean(true));

        let converted = connection
            .convert_database_value(Value::Array(vec![Value::Int(1), Value::Int(2)]), "simple_array")
            .unwrap();
        assert_eq!(converted, Value::String("1,2".to_string()));
    }
}
