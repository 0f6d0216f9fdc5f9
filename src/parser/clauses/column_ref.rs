use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    parser::ParseError,
    structure::{identifiers::is_valid_identifier, AggregateFunction, Clause},
};

static COLUMN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<table>[A-Za-z_][A-Za-z0-9_$]*)\s*\.\s*)?(?P<column>[A-Za-z_][A-Za-z0-9_$]*|\*)$")
        .expect("column pattern")
});

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^(?P<function>[A-Za-z_][A-Za-z0-9_]*)\s*\(\s*(?P<distinct>DISTINCT\s+)?(?P<argument>.*?)\s*\)$")
        .expect("function pattern")
});

static ALIASED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^(?P<expression>.*?\S)\s+AS\s+(?P<alias>[A-Za-z_][A-Za-z0-9_$]*)$").expect("aliased pattern")
});

static BARE_ALIAS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<expression>.*?[A-Za-z0-9_$)*])\s+(?P<alias>[A-Za-z_][A-Za-z0-9_$]*)$")
        .expect("bare alias pattern")
});

/// `[table.]column`, `[table.]*` or `FUNC([DISTINCT] [table.]column|*)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub column: String,
    pub aggregate_function: Option<AggregateFunction>,
    pub distinct: bool,
}

impl ColumnRef {
    pub fn is_wildcard(&self) -> bool {
        self.column == "*"
    }

    /// `start` is the absolute offset of `text`, used for errors.
    pub fn parse(text: &str, clause: Clause, start: usize) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        let start = start + (text.len() - text.trim_start().len());

        if let Some(captures) = FUNCTION.captures(trimmed) {
            let name = &captures["function"];
            let Some(function) = AggregateFunction::from_name(name) else {
                return ParseError::at(&format!("Unsupported function '{}'", name), Some(clause), trimmed, start).err();
            };
            let distinct = captures.name("distinct").is_some();
            let argument = &captures["argument"];
            let Some((table, column)) = Self::column(argument) else {
                return ParseError::at("Unsupported aggregate argument", Some(clause), trimmed, start).err();
            };

            if column == "*" && (table.is_some() || distinct || !function.accepts_wildcard()) {
                return ParseError::at(
                    &format!("{}(*) is not supported", function.as_str()),
                    Some(clause),
                    trimmed,
                    start,
                )
                .err();
            }

            return Ok(Self { table, column, aggregate_function: Some(function), distinct });
        }

        match Self::column(trimmed) {
            Some((table, column)) => Ok(Self { table, column, aggregate_function: None, distinct: false }),
            None => ParseError::at("Unsupported column expression", Some(clause), trimmed, start).err(),
        }
    }

    fn column(text: &str) -> Option<(Option<String>, String)> {
        let captures = COLUMN.captures(text.trim())?;
        let table = captures.name("table").map(|table| table.as_str().to_string());
        let column = captures["column"].to_string();

        if table.as_deref().is_some_and(|table| !is_valid_identifier(table)) {
            return None;
        }
        if column != "*" && !is_valid_identifier(&column) {
            return None;
        }

        Some((table, column))
    }
}

/// Splits `expression [AS] alias` into the expression and its alias.
pub fn split_alias(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim();
    for pattern in [&*ALIASED, &*BARE_ALIAS] {
        if let Some(captures) = pattern.captures(trimmed) {
            if let (Some(expression), Some(alias)) = (captures.name("expression"), captures.name("alias")) {
                return (expression.as_str(), Some(alias.as_str()));
            }
        }
    }
    (trimmed, None)
}

#[cfg(test)]
mod tests {
    use crate::{
        parser::clauses::{split_alias, ColumnRef},
        structure::{AggregateFunction, Clause},
    };

    #[test]
    pub fn test_column_ref_plain_and_qualified() {
        let column = ColumnRef::parse("name", Clause::Select, 0).expect("Failed to parse column");
        assert_eq!(column.table, None);
        assert_eq!(column.column, "name");

        let column = ColumnRef::parse(" u.id ", Clause::Select, 0).expect("Failed to parse column");
        assert_eq!(column.table.as_deref(), Some("u"));
        assert_eq!(column.column, "id");

        let column = ColumnRef::parse("u.*", Clause::Select, 0).expect("Failed to parse wildcard");
        assert!(column.is_wildcard());
    }

    #[test]
    pub fn test_column_ref_aggregates() {
        let column = ColumnRef::parse("count( * )", Clause::Having, 0).expect("Failed to parse count");
        assert_eq!(column.aggregate_function, Some(AggregateFunction::Count));
        assert_eq!(column.column, "*");

        let column = ColumnRef::parse("SUM(DISTINCT o.total)", Clause::Select, 0).expect("Failed to parse sum");
        assert_eq!(column.aggregate_function, Some(AggregateFunction::Sum));
        assert!(column.distinct);
        assert_eq!(column.table.as_deref(), Some("o"));
    }

    #[test]
    pub fn test_column_ref_rejects_unsupported() {
        for text in ["UPPER(name)", "SUM(*)", "COUNT(DISTINCT *)", "a + b", "1abc", "COUNT(a.b.c)"] {
            match ColumnRef::parse(text, Clause::Select, 7) {
                Ok(_) => panic!(),
                Err(err) => {
                    assert_eq!(err.start, 7);
                    assert_eq!(err.text, text);
                },
            }
        }
    }

    #[test]
    pub fn test_column_ref_error_message() {
        let result = ColumnRef::parse("  UPPER(name)", Clause::Where, 10);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.message, "Unsupported function 'UPPER'");
                assert_eq!(err.start, 12);
                assert_eq!(err.clause, Some(Clause::Where));
            },
        }
    }

    #[test]
    pub fn test_split_alias() {
        assert_eq!(split_alias("a.full_name as name"), ("a.full_name", Some("name")));
        assert_eq!(split_alias("COUNT(*) TotBy"), ("COUNT(*)", Some("TotBy")));
        assert_eq!(split_alias("COUNT(DISTINCT b)"), ("COUNT(DISTINCT b)", None));
        assert_eq!(split_alias("b.*"), ("b.*", None));
        assert_eq!(split_alias("users u"), ("users", Some("u")));
    }
}
