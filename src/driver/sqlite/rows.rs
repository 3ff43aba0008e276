use super::statement::Statement;
use crate::{Result, Row, Value};
use futures::Stream;
use rusqlite::types::ValueRef;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Rows are materialized while the statement lock is held; the stream then
/// yields them without touching the connection again.
pub(super) struct SqliteRowsIterator {
    columns: Vec<String>,
    length: usize,
    iterator: Box<dyn Iterator<Item = Row> + Send + Sync>,
}

impl SqliteRowsIterator {
    pub(super) fn new(statement: &Statement) -> Result<Self> {
        let mut statement = statement.statement.lock().unwrap();

        let column_count = statement.0.column_count();
        let columns: Vec<String> = statement
            .0
            .column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = statement.0.raw_query();
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut data_vector: Vec<Value> = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value = row.get_ref(i)?;
                data_vector.push(match value {
                    ValueRef::Null => Value::NULL,
                    ValueRef::Integer(v) => Value::Int(v),
                    ValueRef::Real(v) => Value::Float(v),
                    ValueRef::Text(v) => Value::String(String::from_utf8(v.to_vec())?),
                    ValueRef::Blob(v) => Value::Bytes(v.to_vec()),
                });
            }

            result.push(Row::new(columns.clone(), data_vector));
        }

        Ok(Self {
            columns,
            length: result.len(),
            iterator: Box::new(result.into_iter()),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.length
    }
}

impl Stream for SqliteRowsIterator {
    type Item = Result<Row>;

    fn poll_next(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.iterator.next().map(Ok))
    }
}
