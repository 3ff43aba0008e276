use crate::error::Error;
use crate::{Result, Value};
use futures::stream::{Stream, StreamExt};
use std::fmt::{Display, Formatter};
use std::pin::Pin;

#[derive(Clone, Debug)]
pub enum ColumnIndex {
    Name(String),
    Position(usize),
}

impl Display for ColumnIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnIndex::Name(name) => write!(f, r#""{}""#, name),
            ColumnIndex::Position(index) => write!(f, "#{}", index),
        }
    }
}

impl From<usize> for ColumnIndex {
    fn from(i: usize) -> Self {
        Self::Position(i)
    }
}

impl From<&str> for ColumnIndex {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .enumerate()
                .all(|(index, name)| Some(name) == other.columns.get(index))
            && self
                .values
                .iter()
                .enumerate()
                .all(|(index, value)| Some(value) == other.values.get(index))
    }
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Gets a column by index.
    ///
    /// If an index (string or numeric) is not present, an OutOfBoundsError
    /// error is raised.
    pub fn get<C: Into<ColumnIndex>>(&self, i: C) -> Result<&Value> {
        let i = match i.into() {
            ColumnIndex::Name(name) => self
                .columns
                .iter()
                .position(|column_name| column_name == &name)
                .ok_or_else(|| Error::out_of_bounds(&name))?,
            ColumnIndex::Position(index) => index,
        };

        self.values.get(i).ok_or_else(|| Error::out_of_bounds(i))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// A row collection, collected from an executed statement.
///
/// The rows are streamed out of the collection: once a row has been yielded
/// by [`Rows::next`] it is not held in the collection anymore.
pub struct Rows {
    columns: Vec<String>,
    length: usize,
    stream: Pin<Box<dyn Stream<Item = Result<Row>> + Send>>,
}

impl Rows {
    pub(crate) fn new(
        columns: Vec<String>,
        length: usize,
        stream: Pin<Box<dyn Stream<Item = Result<Row>> + Send>>,
    ) -> Self {
        Self {
            columns,
            length,
            stream,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The number of rows the statement produced, including the rows already
    /// yielded.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Advances the stream and returns the next row, or [`None`] when the
    /// collection is exhausted.
    pub async fn next(&mut self) -> Result<Option<Row>> {
        self.stream.next().await.transpose()
    }

    /// Collects all the remaining rows into a vector.
    pub async fn to_vec(mut self) -> Result<Vec<Row>> {
        let mut result = Vec::with_capacity(self.length);
        while let Some(row) = self.next().await? {
            result.push(row);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{Row, Value};
    use tokio_test::assert_err;

    #[test]
    fn test_row_can_be_queried() {
        let row = Row::new(
            vec!["col_1".to_string(), "col_test".to_string()],
            vec![Value::NULL, Value::String("test_value".to_string())],
        );
        assert_eq!(
            row.get("col_1").expect("Failed to retrieve 'col_1' column"),
            &Value::NULL
        );
        assert_eq!(
            row.get(0).expect("Failed to retrieve first column"),
            &Value::NULL
        );
        assert_eq!(
            row.get("col_test")
                .expect("Failed to retrieve 'col_test' column"),
            &Value::String("test_value".to_string())
        );
        assert_eq!(
            row.get(1).expect("Failed to retrieve second column"),
            &Value::String("test_value".to_string())
        );
    }

    #[test]
    fn test_nonexistent_row_name_should_return_an_error() {
        let row = Row::new(
            vec!["col_1".to_string(), "col_test".to_string()],
            vec![Value::NULL, Value::String("test_value".to_string())],
        );
        assert_err!(row.get("col_non_existent"));
        let e = assert_err!(row.get(42));
        assert_eq!(e.kind(), ErrorKind::OutOfBoundsError);
    }

    #[test]
    fn test_rows_are_comparable_with_eq() {
        let row = Row::new(
            vec!["col_1".to_string(), "col_test".to_string()],
            vec![Value::NULL, Value::String("test_value".to_string())],
        );
        let row_2 = Row::new(
            vec!["col_1".to_string(), "col_test".to_string()],
            vec![Value::NULL, Value::String("test_value".to_string())],
        );
        assert_eq!(row, row_2);
    }
}
