use crate::mapper::token::parse_tokens;
use crate::r#type::{IntoType, TypePtr};
use crate::value::TypedValue;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn returns_rows(&self) -> bool {
        matches!(self, StatementKind::Select)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Placeholder {
    pub(crate) name: String,
    pub(crate) r#type: Option<TypePtr>,
}

/// A SQL template registered under an identifier.
///
/// `#{name}` placeholders are translated to driver positional placeholders
/// and bound through type handlers; `${name}` tokens are spliced into the
/// SQL text before the statement is prepared. Templates without `${}`
/// tokens are translated once at registration.
pub struct MappedStatement {
    id: String,
    kind: StatementKind,
    source: String,
    translated: Option<Translated>,
}

#[derive(Clone)]
struct Translated {
    sql: String,
    placeholders: Vec<Placeholder>,
}

impl MappedStatement {
    pub fn new(
        id: impl Into<String>,
        kind: StatementKind,
        source: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let source = source.into();
        let translated = if contains_raw_token(&source) {
            None
        } else {
            Some(translate(&id, &source)?)
        };

        Ok(Self {
            id,
            kind,
            source,
            translated,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Produces the driver SQL and the ordered placeholder list for an
    /// execution with the given values.
    pub(crate) fn render(
        &self,
        values: &HashMap<&str, TypedValue>,
    ) -> Result<(String, Vec<Placeholder>)> {
        if let Some(translated) = &self.translated {
            return Ok((translated.sql.clone(), translated.placeholders.clone()));
        }

        // raw substitutions first, binding placeholders on the result
        let substituted = parse_tokens(&self.source, "${", "}", &mut |name| {
            let name = name.trim();
            values
                .get(name)
                .map(|typed| typed.value.to_string())
                .ok_or_else(|| Error::missing_parameter(name, &self.id))
        })?;
        let translated = translate(&self.id, &substituted)?;

        Ok((translated.sql, translated.placeholders))
    }
}

impl Debug for MappedStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedStatement")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish()
    }
}

fn contains_raw_token(source: &str) -> bool {
    let mut rest = source;
    while let Some(position) = rest.find("${") {
        if !rest[..position].ends_with('\\') {
            return true;
        }
        rest = &rest[position + 2..];
    }

    false
}

fn translate(id: &str, source: &str) -> Result<Translated> {
    let mut placeholders = Vec::new();
    let sql = parse_tokens(source, "#{", "}", &mut |expression| {
        placeholders.push(parse_expression(id, expression)?);
        Ok("?".to_string())
    })?;

    Ok(Translated { sql, placeholders })
}

fn parse_expression(id: &str, expression: &str) -> Result<Placeholder> {
    let mut parts = expression.split(',');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(Error::invalid_statement(id, "empty placeholder name"));
    }

    let mut r#type = None;
    for attribute in parts {
        let attribute = attribute.trim();
        let Some((key, value)) = attribute.split_once('=') else {
            return Err(Error::invalid_statement(
                id,
                format!(r#"malformed placeholder attribute "{}""#, attribute),
            ));
        };

        match key.trim() {
            "type" => {
                r#type = Some(value.trim().into_type()?);
            }
            unknown => {
                return Err(Error::invalid_statement(
                    id,
                    format!(r#"unknown placeholder attribute "{}""#, unknown),
                ));
            }
        }
    }

    Ok(Placeholder {
        name: name.to_string(),
        r#type,
    })
}

#[cfg(test)]
mod tests {
    use super::{MappedStatement, StatementKind};
    use crate::error::ErrorKind;
    use crate::value::TypedValue;
    use crate::Value;
    use std::collections::HashMap;

    #[test]
    fn placeholders_are_translated_to_positional_markers() {
        let statement = MappedStatement::new(
            "get_user_by_id",
            StatementKind::Select,
            "select * from user where id = #{id} and status = #{status, type=string}",
        )
        .unwrap();

        let (sql, placeholders) = statement.render(&HashMap::new()).unwrap();
        assert_eq!(sql, "select * from user where id = ? and status = ?");
        assert_eq!(placeholders.len(), 2);
        assert_eq!(placeholders[0].name, "id");
        assert!(placeholders[0].r#type.is_none());
        assert_eq!(placeholders[1].name, "status");
        assert_eq!(
            placeholders[1].r#type.as_ref().unwrap().get_name(),
            "string"
        );
    }

    #[test]
    fn raw_tokens_are_rendered_per_execution() {
        let statement = MappedStatement::new(
            "count_rows",
            StatementKind::Select,
            "select count(*) from ${table} where id = #{id}",
        )
        .unwrap();

        let mut values = HashMap::new();
        values.insert("table", TypedValue::from(Value::from("user")));
        let (sql, placeholders) = statement.render(&values).unwrap();
        assert_eq!(sql, "select count(*) from user where id = ?");
        assert_eq!(placeholders.len(), 1);
    }

    #[test]
    fn raw_tokens_require_a_value() {
        let statement = MappedStatement::new(
            "count_rows",
            StatementKind::Select,
            "select count(*) from ${table}",
        )
        .unwrap();

        let error = statement.render(&HashMap::new()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingParameter);
    }

    #[test]
    fn unknown_placeholder_attributes_are_rejected() {
        let error = MappedStatement::new(
            "broken",
            StatementKind::Select,
            "select * from user where id = #{id, javaType=long}",
        )
        .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidStatement);
    }

    #[test]
    fn unknown_placeholder_types_are_rejected() {
        let error = MappedStatement::new(
            "broken",
            StatementKind::Select,
            "select * from user where id = #{id, type=no_such_type}",
        )
        .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownType);
    }

    #[test]
    fn empty_placeholder_names_are_rejected() {
        let error =
            MappedStatement::new("broken", StatementKind::Select, "select #{} from user")
                .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidStatement);
    }
}
