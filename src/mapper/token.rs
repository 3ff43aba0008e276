use crate::Result;

/// Scans `text` for tokens delimited by `open` and `close`, feeding each
/// token body to `handler` and splicing the returned replacement into the
/// output.
///
/// An open delimiter prefixed with a backslash is emitted literally (minus
/// the backslash). An open delimiter without a matching close delimiter is
/// emitted literally as well.
pub(crate) fn parse_tokens(
    text: &str,
    open: &str,
    close: &str,
    handler: &mut dyn FnMut(&str) -> Result<String>,
) -> Result<String> {
    let mut builder = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(open) {
        if rest[..start].ends_with('\\') {
            builder.push_str(&rest[..start - 1]);
            builder.push_str(open);
            rest = &rest[start + open.len()..];
            continue;
        }

        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(close) else {
            break;
        };

        builder.push_str(&rest[..start]);
        builder.push_str(&handler(&after_open[..end])?);
        rest = &after_open[end + close.len()..];
    }

    builder.push_str(rest);
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::parse_tokens;

    fn upper(body: &str) -> crate::Result<String> {
        Ok(body.to_uppercase())
    }

    #[test]
    fn tokens_are_replaced_in_order() {
        let result = parse_tokens(
            "select * from user where id = #{id} and name = #{name}",
            "#{",
            "}",
            &mut upper,
        )
        .unwrap();

        assert_eq!(result, "select * from user where id = ID and name = NAME");
    }

    #[test]
    fn escaped_tokens_are_emitted_literally() {
        let result = parse_tokens(r"select '\#{not_a_token}' as t", "#{", "}", &mut upper).unwrap();
        assert_eq!(result, "select '#{not_a_token}' as t");
    }

    #[test]
    fn unterminated_tokens_are_left_alone() {
        let result = parse_tokens("select #{oops from t", "#{", "}", &mut upper).unwrap();
        assert_eq!(result, "select #{oops from t");
    }

    #[test]
    fn handler_errors_are_propagated() {
        let result = parse_tokens("#{x}", "#{", "}", &mut |_| {
            Err(crate::Error::type_mismatch())
        });
        assert!(result.is_err());
    }

    #[test]
    fn text_without_tokens_is_unchanged() {
        let result = parse_tokens("select 1", "#{", "}", &mut upper).unwrap();
        assert_eq!(result, "select 1");
    }
}
