use crate::driver::statement::Statement;
use crate::{AsyncResult, Result, TransactionIsolationLevel};
use std::fmt::Debug;

pub(in crate::driver) trait DriverConnection<T>: Sized {
    /// Creates a new driver connection.
    fn create(params: T) -> Result<Self>;
}

pub trait Connection<'conn>: Debug {
    /// Prepares a statement for execution and returns a Statement object.
    fn prepare(&'conn self, sql: &str) -> Result<Box<dyn Statement<'conn> + 'conn>>;

    /// Applies the given transaction isolation level to the session.
    ///
    /// Levels the driver cannot honor surface an
    /// UnsupportedIsolationLevel error.
    fn set_transaction_isolation(
        &'conn self,
        level: TransactionIsolationLevel,
    ) -> AsyncResult<'conn, ()>;
}
