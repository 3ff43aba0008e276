use crate::rows::{Row, Rows};
use crate::Result;
use std::fmt::{Debug, Formatter};

/// The result set of an executed statement.
pub struct StatementResult {
    column_count: usize,
    rows: Rows,
}

impl StatementResult {
    pub(crate) fn new(rows: Rows) -> Self {
        Self {
            column_count: rows.columns().len(),
            rows,
        }
    }

    /// Returns the *NEXT* row of the statement if any.
    /// If the result has been consumed fully, [`None`] is returned.
    pub async fn fetch_one(&mut self) -> Result<Option<Row>> {
        self.rows.next().await
    }

    /// Returns all the *REMAINING* rows of the statement.
    ///
    /// If the result has been consumed partly, only the remaining rows are
    /// collected and returned into the vector. Consequently, if the result
    /// has been fetched fully, an empty vector is returned.
    pub async fn fetch_all(self) -> Result<Vec<Row>> {
        self.rows.to_vec().await
    }

    /// Returns the number of columns in the result set.
    /// If there is no result set, 0 is returned.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn columns(&self) -> &[String] {
        self.rows.columns()
    }

    /// The number of rows the statement produced.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl Debug for StatementResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementResult")
            .field("column_count", &self.column_count)
            .field("row_count", &self.rows.len())
            .finish()
    }
}
