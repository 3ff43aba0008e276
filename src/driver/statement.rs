use crate::driver::statement_result::StatementResult;
use crate::{AsyncResult, Parameter, ParameterIndex, Parameters, Result};

pub trait Statement<'conn> {
    /// Binds a value to a corresponding named or positional placeholder in the SQL statement
    /// that was used to prepare the statement.
    ///
    /// * `param` Parameter identifier. For a prepared statement using named placeholders, this will
    ///           be a parameter name of the form :name. For a prepared statement using question
    ///           mark placeholders, this will be the 0-indexed position of the parameter.
    /// * `value` The value to bind to the parameter.
    fn bind_value(&self, param: ParameterIndex, value: Parameter) -> Result<()>;

    /// Executes a prepared statement, returning the produced rows.
    ///
    /// * `params` A collection of values with as many elements as there are bound parameters in
    ///            the SQL statement being executed, bound before execution on top of the values
    ///            already bound with [`Statement::bind_value`].
    fn query(&self, params: Parameters) -> AsyncResult<'_, StatementResult>;

    /// Executes a prepared statement consuming it, returning the produced rows.
    fn query_owned(
        self: Box<Self>,
        params: Vec<(ParameterIndex, Parameter)>,
    ) -> AsyncResult<'conn, StatementResult>;

    /// Executes a prepared statement, returning the number of affected rows.
    fn execute(&self, params: Parameters) -> AsyncResult<'_, usize>;

    /// Executes a prepared statement consuming it, returning the number of affected rows.
    fn execute_owned(
        self: Box<Self>,
        params: Vec<(ParameterIndex, Parameter)>,
    ) -> AsyncResult<'conn, usize>;

    /// Returns the number of rows affected by the last DELETE, INSERT, or UPDATE statement
    /// executed by the corresponding object.
    ///
    /// If the last SQL statement executed by the associated Statement object was a SELECT
    /// statement, some databases may return the number of rows returned by that statement.
    /// However, this behaviour is not guaranteed for all databases and should not be
    /// relied on for portable applications.
    fn row_count(&self) -> usize;
}
