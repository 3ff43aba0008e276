mod statement;
mod token;

pub use statement::{MappedStatement, StatementKind};

use crate::configuration::Configuration;
use crate::driver::statement::Statement;
use crate::parameter::NO_PARAMS;
use crate::r#type::TypeManager;
use crate::value::{TypedValue, ValueMap};
use crate::{Connection, Error, ParameterIndex, Result, Row};
use dashmap::DashMap;
use log::debug;
use statement::Placeholder;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a value of the implementing type out of a result row.
///
/// Usually derived with `#[derive(FromRow)]`, which maps columns to fields
/// by name.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}

/// Registry of mapped statements.
///
/// Statements are registered once under an identifier and executed against
/// any connection; parameters are taken from a value map keyed by
/// placeholder name.
pub struct SqlMap {
    statements: DashMap<String, Arc<MappedStatement>>,
}

impl SqlMap {
    pub fn new() -> Self {
        Self {
            statements: DashMap::new(),
        }
    }

    pub fn add_statement(&self, statement: MappedStatement) -> Result<()> {
        if self.statements.contains_key(statement.id()) {
            return Err(Error::duplicate_statement(statement.id()));
        }

        debug!(r#"registering statement "{}""#, statement.id());
        self.statements
            .insert(statement.id().to_string(), Arc::new(statement));

        Ok(())
    }

    pub fn statement(&self, id: &str) -> Result<Arc<MappedStatement>> {
        self.statements
            .get(id)
            .map(|r| r.value().clone())
            .ok_or_else(|| Error::unknown_statement(id))
    }

    /// Executes a mapped statement, returning the produced rows.
    pub async fn query<'v, VM>(
        &self,
        connection: &Connection,
        id: &str,
        values: VM,
    ) -> Result<Vec<Row>>
    where
        VM: ValueMap<'v>,
        VM::Item: Into<TypedValue>,
    {
        let values = normalize(values);
        let result = self.run(connection, id, &values).await?;
        result.fetch_all().await
    }

    /// Executes a mapped statement, returning the first produced row if any.
    pub async fn query_one<'v, VM>(
        &self,
        connection: &Connection,
        id: &str,
        values: VM,
    ) -> Result<Option<Row>>
    where
        VM: ValueMap<'v>,
        VM::Item: Into<TypedValue>,
    {
        let values = normalize(values);
        let mut result = self.run(connection, id, &values).await?;
        result.fetch_one().await
    }

    /// Executes a mapped statement, mapping every produced row onto `T`.
    pub async fn fetch<'v, T, VM>(
        &self,
        connection: &Connection,
        id: &str,
        values: VM,
    ) -> Result<Vec<T>>
    where
        T: FromRow,
        VM: ValueMap<'v>,
        VM::Item: Into<TypedValue>,
    {
        self.query(connection, id, values)
            .await?
            .iter()
            .map(T::from_row)
            .collect()
    }

    /// Executes a mapped statement, mapping the first produced row onto `T`.
    pub async fn fetch_one<'v, T, VM>(
        &self,
        connection: &Connection,
        id: &str,
        values: VM,
    ) -> Result<Option<T>>
    where
        T: FromRow,
        VM: ValueMap<'v>,
        VM::Item: Into<TypedValue>,
    {
        self.query_one(connection, id, values)
            .await?
            .map(|row| T::from_row(&row))
            .transpose()
    }

    /// Executes a mapped statement, returning the number of affected rows.
    pub async fn execute<'v, VM>(
        &self,
        connection: &Connection,
        id: &str,
        values: VM,
    ) -> Result<usize>
    where
        VM: ValueMap<'v>,
        VM::Item: Into<TypedValue>,
    {
        let values = normalize(values);
        let statement = self.statement(id)?;
        let (sql, placeholders) = statement.render(&values)?;

        debug!(r#"executing statement "{}""#, id);
        let prepared = connection.prepare(&sql)?;
        bind_placeholders(
            prepared.as_ref(),
            id,
            &placeholders,
            &values,
            connection.configuration(),
        )?;

        prepared.execute(NO_PARAMS).await
    }

    async fn run(
        &self,
        connection: &Connection,
        id: &str,
        values: &HashMap<&str, TypedValue>,
    ) -> Result<crate::driver::statement_result::StatementResult> {
        let statement = self.statement(id)?;
        if !statement.kind().returns_rows() {
            return Err(Error::invalid_statement(id, "the statement does not produce rows"));
        }
        let (sql, placeholders) = statement.render(values)?;

        debug!(r#"executing statement "{}""#, id);
        let prepared = connection.prepare(&sql)?;
        bind_placeholders(
            prepared.as_ref(),
            id,
            &placeholders,
            values,
            connection.configuration(),
        )?;

        prepared.query(NO_PARAMS).await
    }
}

impl Default for SqlMap {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize<'v, VM>(values: VM) -> HashMap<&'v str, TypedValue>
where
    VM: ValueMap<'v>,
    VM::Item: Into<TypedValue>,
{
    values
        .into_iter()
        .map(|(name, value)| (name, value.into()))
        .collect()
}

/// Binds every placeholder through its type handler: the declared one when
/// the template or the value names it, the one inferred from the value
/// otherwise. NULL values carry the declared handler's binding type, falling
/// back to the configured null binding type.
fn bind_placeholders(
    statement: &dyn Statement<'_>,
    id: &str,
    placeholders: &[Placeholder],
    values: &HashMap<&str, TypedValue>,
    configuration: &Configuration,
) -> Result<()> {
    for (position, placeholder) in placeholders.iter().enumerate() {
        let value = values
            .get(placeholder.name.as_str())
            .cloned()
            .ok_or_else(|| Error::missing_parameter(&placeholder.name, id))?;

        let declared = placeholder.r#type.clone().or_else(|| value.r#type.clone());
        let handler = match declared.clone() {
            Some(handler) => handler,
            None => TypeManager::get_instance().get_type_for_value(&value.value)?,
        };
        let null_type = declared
            .map(|handler| handler.get_binding_type())
            .or_else(|| configuration.get_null_binding_type());

        handler.bind_parameter(
            statement,
            &ParameterIndex::Positional(position),
            value.value,
            null_type,
            configuration,
        )?;
    }

    Ok(())
}
