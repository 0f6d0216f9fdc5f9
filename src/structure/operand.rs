use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("number pattern"));

/// Plain decimal or scientific notation, as accepted in a SQL literal.
pub fn is_number_literal(text: &str) -> bool {
    NUMBER.is_match(text)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Literal {
    String(String),
    /// Kept as written so `1.50` survives a round trip unchanged.
    Number(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Literal::Number(value) => write!(f, "{}", value),
            Literal::Boolean(true) => write!(f, "TRUE"),
            Literal::Boolean(false) => write!(f, "FALSE"),
            Literal::Null => write!(f, "NULL"),
        }
    }
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Operand {
    Parameter(String),
    Literal(Literal),
    Column { table: Option<String>, column: String },
}

impl Operand {
    pub fn param(name: &str) -> Self {
        Operand::Parameter(name.trim_start_matches(':').to_string())
    }

    pub fn string(value: &str) -> Self {
        Operand::Literal(Literal::String(value.to_string()))
    }

    pub fn number<T: fmt::Display>(value: T) -> Self {
        Operand::Literal(Literal::Number(value.to_string()))
    }

    pub fn boolean(value: bool) -> Self {
        Operand::Literal(Literal::Boolean(value))
    }

    pub fn null() -> Self {
        Operand::Literal(Literal::Null)
    }

    pub fn column(table: Option<&str>, column: &str) -> Self {
        Operand::Column { table: table.map(str::to_string), column: column.to_string() }
    }

    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            Operand::Parameter(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Parameter(name) => write!(f, ":{}", name),
            Operand::Literal(literal) => write!(f, "{}", literal),
            Operand::Column { table: Some(table), column } => write!(f, "{}.{}", table, column),
            Operand::Column { table: None, column } => write!(f, "{}", column),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::structure::{is_number_literal, Literal, Operand};

    #[test]
    pub fn test_operand_display() {
        assert_eq!(Operand::param(":min_age").to_string(), ":min_age");
        assert_eq!(Operand::string("O'Brien").to_string(), "'O''Brien'");
        assert_eq!(Operand::number(18).to_string(), "18");
        assert_eq!(Operand::boolean(false).to_string(), "FALSE");
        assert_eq!(Operand::null().to_string(), "NULL");
        assert_eq!(Operand::column(Some("u"), "id").to_string(), "u.id");
    }

    #[test]
    pub fn test_number_literal() {
        assert!(is_number_literal("18"));
        assert!(is_number_literal("-1.50"));
        assert!(is_number_literal(".5e-3"));
        assert!(!is_number_literal("1; DROP TABLE users"));
        assert!(!is_number_literal(""));
    }

    #[test]
    pub fn test_operand_json_shape() {
        let value = serde_json::to_value(Operand::number("1.50")).expect("Failed to serialize operand");
        assert_eq!(value, json!({ "kind": "literal", "value": { "type": "number", "value": "1.50" } }));

        let parsed: Operand = serde_json::from_value(json!({ "kind": "parameter", "value": "city" }))
            .expect("Failed to deserialize operand");
        assert_eq!(parsed, Operand::Parameter("city".into()));

        let parsed: Operand = serde_json::from_value(json!({ "kind": "literal", "value": { "type": "null" } }))
            .expect("Failed to deserialize null");
        assert_eq!(parsed, Operand::Literal(Literal::Null));
    }
}
