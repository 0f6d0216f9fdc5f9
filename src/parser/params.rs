use std::collections::HashMap;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::trace;

use crate::parser::scanner::Scanner;

static PARAMETER: Lazy<Regex> = Lazy::new(|| Regex::new(r":([A-Za-z0-9_]+)").expect("parameter pattern"));

/// One `:name` placeholder; `start` is the byte offset of the colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterOccurrence {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// SQL with every named placeholder replaced by `?`.
///
/// `parameters[i]` is the name bound at the i-th `?` of `sql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalSql {
    pub sql: String,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("No value supplied for parameter ':{0}'")]
    Missing(String),
}

impl PositionalSql {
    pub fn placeholder_count(&self) -> usize {
        self.parameters.len()
    }

    /// Values in placeholder order. A name used twice is bound twice.
    pub fn bind<'v, T>(&self, values: &'v HashMap<String, T>) -> Result<Vec<&'v T>, BindError> {
        self.parameters
            .iter()
            .map(|name| values.get(name).ok_or_else(|| BindError::Missing(name.clone())))
            .collect()
    }
}

/// Placeholders found in code spans, in text order.
///
/// A colon next to another colon is a `::` cast, never a parameter.
pub fn parameter_occurrences(sql: &str) -> Vec<ParameterOccurrence> {
    let bytes = sql.as_bytes();
    let mut occurrences: Vec<ParameterOccurrence> = vec![];

    for span in Scanner::new(sql).filter(|span| span.kind.is_code()) {
        for captures in PARAMETER.captures_iter(span.text(sql)) {
            let (Some(full), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let start = span.start + full.start();
            if start > 0 && bytes[start - 1] == b':' {
                continue;
            }
            occurrences.push(ParameterOccurrence {
                name: name.as_str().to_string(),
                start,
                end: span.start + full.end(),
            });
        }
    }

    occurrences
}

/// Distinct parameter names in first-occurrence order.
pub fn extract_parameters(sql: &str) -> Vec<String> {
    parameter_occurrences(sql)
        .into_iter()
        .map(|occurrence| occurrence.name)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Rewrites `:name` placeholders to positional `?` markers.
///
/// Occurrences are replaced from the last to the first so that each
/// replacement leaves the offsets of the remaining ones untouched.
pub fn replace_parameters_positionally(sql: &str) -> PositionalSql {
    let occurrences = parameter_occurrences(sql);

    let mut rewritten = sql.to_string();
    for occurrence in occurrences.iter().rev() {
        rewritten.replace_range(occurrence.start..occurrence.end, "?");
    }

    trace!(placeholders = occurrences.len(), "named parameters rewritten");

    PositionalSql {
        sql: rewritten,
        parameters: occurrences.into_iter().map(|occurrence| occurrence.name).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::parser::params::*;

    #[test]
    pub fn test_extract_parameters_ignores_literals_and_comments() {
        let result = extract_parameters("SELECT ':x' FROM t -- :y\n WHERE c = :z");

        assert_eq!(result, vec!["z"]);
    }

    #[test]
    pub fn test_extract_parameters_unique_in_order() {
        let result = extract_parameters("WHERE a = :a AND b = :b OR c = :a");

        assert_eq!(result, vec!["a", "b"]);
    }

    #[test]
    pub fn test_extract_parameters_block_comment_and_double_quotes() {
        let result = extract_parameters("SELECT \"col:x\" /* :y */ FROM t WHERE id = :id_1");

        assert_eq!(result, vec!["id_1"]);
    }

    #[test]
    pub fn test_extract_parameters_skips_casts() {
        let result = extract_parameters("SELECT a::int FROM t WHERE b = :value::text");

        assert_eq!(result, vec!["value"]);
    }

    #[test]
    pub fn test_unterminated_literal_hides_parameters() {
        let result = extract_parameters("WHERE a = :a AND b = 'open :b");

        assert_eq!(result, vec!["a"]);
    }

    #[test]
    pub fn test_replace_parameters_positionally() {
        let result = replace_parameters_positionally("WHERE a = :a AND b = :b OR c = :a");

        assert_eq!(result.sql, "WHERE a = ? AND b = ? OR c = ?");
        assert_eq!(result.parameters, vec!["a", "b", "a"]);
        assert_eq!(result.placeholder_count(), 3);
    }

    #[test]
    pub fn test_replace_parameters_keeps_literals() {
        let result = replace_parameters_positionally("SELECT ':x', name FROM t WHERE name = :name -- :y");

        assert_eq!(result.sql, "SELECT ':x', name FROM t WHERE name = ? -- :y");
        assert_eq!(result.parameters, vec!["name"]);
    }

    #[test]
    pub fn test_replace_parameters_multibyte_text() {
        let result = replace_parameters_positionally("WHERE city = 'Évora' AND id = :id AND x = :ç");

        assert_eq!(result.sql, "WHERE city = 'Évora' AND id = ? AND x = :ç");
        assert_eq!(result.parameters, vec!["id"]);
    }

    #[test]
    pub fn test_bind_values() {
        let positional = replace_parameters_positionally("a = :a AND b = :b AND c = :a");
        let values = HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);

        let bound = positional.bind(&values).expect("Failed to bind values");
        assert_eq!(bound, vec![&1, &2, &1]);

        let values = HashMap::from([("a".to_string(), 1)]);
        assert_eq!(positional.bind(&values), Err(BindError::Missing("b".into())));
    }
}
