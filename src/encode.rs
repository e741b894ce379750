use std::collections::HashSet;

/// A classified field value ready for SQL embedding.
///
/// Every raw field lands in one of three forms: a bare numeric token, the
/// NULL keyword, or quoted text. `Int(None)` and `Text(None)` both render
/// as NULL but are kept apart so parameter binding knows the column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// Raw trimmed token from a numeric column. The token is carried
    /// verbatim; it is parsed only when bound as a parameter.
    Int(Option<String>),
    Text(Option<String>),
}

impl SqlValue {
    /// Classify one raw field. Trims first, then:
    /// numeric columns pass the token through unquoted (empty or `NULL`
    /// means SQL NULL), text columns map the exact token `NULL` and the
    /// empty string to SQL NULL, everything else gets quoted.
    pub fn classify(raw: &str, numeric: bool) -> SqlValue {
        let trimmed = raw.trim();
        if numeric {
            if trimmed.is_empty() || trimmed == "NULL" {
                SqlValue::Int(None)
            } else {
                SqlValue::Int(Some(trimmed.to_string()))
            }
        } else if trimmed == "NULL" || trimmed.is_empty() {
            SqlValue::Text(None)
        } else {
            SqlValue::Text(Some(trimmed.to_string()))
        }
    }

    /// Render the value as a SQL literal. Embedded single quotes are
    /// escaped by doubling, so text can never terminate the literal early.
    pub fn render(&self) -> String {
        match self {
            SqlValue::Int(Some(tok)) => tok.clone(),
            SqlValue::Int(None) | SqlValue::Text(None) => "NULL".to_string(),
            SqlValue::Text(Some(s)) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

/// Classify a whole row against the set of numeric column positions.
/// Output order and length always match the input.
pub fn classify_row<S: AsRef<str>>(fields: &[S], numeric_positions: &[usize]) -> Vec<SqlValue> {
    let numeric: HashSet<usize> = numeric_positions.iter().copied().collect();
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| SqlValue::classify(f.as_ref(), numeric.contains(&i)))
        .collect()
}

/// Encode a row as a parenthesized SQL value list: `(v0,v1,...,vn)`.
/// No trailing comma, no terminator; the caller appends the semicolon.
pub fn encode_row<S: AsRef<str>>(fields: &[S], numeric_positions: &[usize]) -> String {
    let values = classify_row(fields, numeric_positions)
        .iter()
        .map(SqlValue::render)
        .collect::<Vec<_>>()
        .join(",");
    format!("({})", values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_position_passes_token_through_unquoted() {
        assert_eq!(SqlValue::classify(" 42 ", true).render(), "42");
        assert_eq!(SqlValue::classify("007", true).render(), "007");
    }

    #[test]
    fn empty_numeric_field_becomes_null() {
        assert_eq!(SqlValue::classify("", true), SqlValue::Int(None));
        assert_eq!(SqlValue::classify("  ", true).render(), "NULL");
        assert_eq!(SqlValue::classify("NULL", true).render(), "NULL");
    }

    #[test]
    fn null_token_is_bare_not_quoted() {
        assert_eq!(SqlValue::classify("NULL", false).render(), "NULL");
        assert_eq!(SqlValue::classify(" NULL ", false).render(), "NULL");
        // case-sensitive: lowercase is ordinary text
        assert_eq!(SqlValue::classify("null", false).render(), "'null'");
    }

    #[test]
    fn empty_text_field_becomes_null() {
        assert_eq!(SqlValue::classify("", false).render(), "NULL");
        assert_eq!(SqlValue::classify("   ", false).render(), "NULL");
    }

    #[test]
    fn text_is_trimmed_and_quoted() {
        assert_eq!(SqlValue::classify(" MENDOTA HEIGHTS ", false).render(), "'MENDOTA HEIGHTS'");
    }

    #[test]
    fn apostrophes_are_doubled() {
        assert_eq!(SqlValue::classify("O'Brien", false).render(), "'O''Brien'");
    }

    #[test]
    fn row_arity_and_shape() {
        let out = encode_row(&["a", "b", "c"], &[]);
        assert_eq!(out, "('a','b','c')");
        assert_eq!(out.matches(',').count(), 2);
        assert!(out.starts_with('(') && out.ends_with(')'));
    }

    #[test]
    fn observed_manifest_row() {
        let fields = [
            "045X021624001",
            "0",
            "20240201123000",
            "045X021624",
            "045",
            "1",
            "02162024",
            "41750686",
            "02152024",
            "DOOLITTLE CARPET & PAINT",
            "MOHAWK WHSE/MENDOTA HEIGHTS",
            "2359 WATERS DRIVE",
            "",
            "MENDOTA HEIGHTS",
            "MN",
            "55120",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ];
        let numeric = [5, 16, 17, 18, 21];
        let values = classify_row(&fields, &numeric);
        assert_eq!(values.len(), fields.len());
        assert_eq!(values[5].render(), "1");
        assert_eq!(values[0].render(), "'045X021624001'");

        let encoded = encode_row(&fields, &numeric);
        assert!(encoded.starts_with("('045X021624001','0',"));
        assert!(encoded.contains("'045',1,'02162024'"));
        assert!(encoded.ends_with(",NULL,NULL,NULL)"));
    }
}
