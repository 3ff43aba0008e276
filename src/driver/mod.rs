use crate::{
    AsyncResult, ConnectionOptions, Error, Parameters, Result, TransactionIsolationLevel,
};
use connection::Connection;
use statement::Statement;
use statement_result::StatementResult;

pub mod connection;
pub mod statement;
pub mod statement_result;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[derive(Debug)]
pub struct Driver {
    inner_driver: Box<dyn for<'conn> Connection<'conn>>,
}

impl Driver {
    pub fn create_with_connection(connection: Box<dyn for<'conn> Connection<'conn>>) -> Self {
        Self {
            inner_driver: connection,
        }
    }

    pub async fn create(connection_options: &ConnectionOptions) -> Result<Self> {
        let driver = match connection_options.scheme.as_deref().unwrap_or_default() {
            #[cfg(feature = "sqlite")]
            "sqlite" => {
                Box::new(sqlite::Driver::create_from_options(connection_options.into())?)
                    as Box<dyn for<'conn> Connection<'conn>>
            }
            proto => return Err(Error::unknown_driver(proto)),
        };

        Ok(Self {
            inner_driver: driver,
        })
    }

    pub fn prepare(&self, sql: &str) -> Result<Box<dyn Statement<'_> + '_>> {
        self.inner_driver.prepare(sql)
    }

    /// Executes an SQL statement, returning the produced result set.
    pub fn query(&self, sql: &str, params: Parameters<'_>) -> AsyncResult<'_, StatementResult> {
        let params = Vec::from(params);
        let prepared = self.prepare(sql);

        Box::pin(async move { prepared?.query_owned(params).await })
    }

    /// Executes an SQL statement, returning the number of affected rows.
    pub fn execute(&self, sql: &str, params: Parameters<'_>) -> AsyncResult<'_, usize> {
        let params = Vec::from(params);
        let prepared = self.prepare(sql);

        Box::pin(async move { prepared?.execute_owned(params).await })
    }

    pub fn set_transaction_isolation(
        &self,
        level: TransactionIsolationLevel,
    ) -> AsyncResult<'_, ()> {
        self.inner_driver.set_transaction_isolation(level)
    }
}

#[cfg(test)]
mod tests {
    use crate::driver::statement::Statement as _;
    use crate::driver::Driver;
    use crate::{params, ConnectionOptions};

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn can_create_connection() {
        let options = ConnectionOptions::try_from("sqlite://:memory:").unwrap();
        let connection = Driver::create(&options).await.expect("Must be connected");

        let statement = connection.prepare("SELECT 1").expect("Prepare failed");
        let result = statement.query(params![]).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let options = ConnectionOptions::try_from("oracle://localhost/db").unwrap();
        let result = Driver::create(&options).await;
        assert!(result.is_err());
    }
}
