use once_cell::sync::Lazy;
use regex::Regex;

pub const IDENTIFIER_PATTERN: &str = r"[A-Za-z_][A-Za-z0-9_$]*";

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{IDENTIFIER_PATTERN}$")).expect("identifier pattern"));

static TABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{IDENTIFIER_PATTERN}(?:\.{IDENTIFIER_PATTERN})?$")).expect("table name pattern")
});

const RESERVED: &[&str] = &[
    "ALL", "AND", "AS", "ASC", "BETWEEN", "BY", "CROSS", "DESC", "DISTINCT", "EXCEPT", "FALSE", "FROM", "FULL",
    "GROUP", "HAVING", "IN", "INNER", "INTERSECT", "IS", "JOIN", "LEFT", "LIKE", "LIMIT", "NATURAL", "NOT", "NULL",
    "OFFSET", "ON", "OR", "ORDER", "OUTER", "OVER", "RIGHT", "SELECT", "TRUE", "UNION", "USING", "WHERE", "WITH",
];

pub fn is_reserved(word: &str) -> bool {
    RESERVED.iter().any(|reserved| reserved.eq_ignore_ascii_case(word))
}

/// Bare identifier usable as column, alias or table reference.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name) && !is_reserved(name)
}

/// Table names may be schema qualified (`schema.table`).
pub fn is_valid_table_name(name: &str) -> bool {
    TABLE_NAME.is_match(name) && name.split('.').all(|part| !is_reserved(part))
}

/// SQL identifiers compare case-insensitively.
pub fn same_identifier(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right)
}

/// Name other clauses use to refer to an unaliased table: `public.users` is referenced as `users`.
pub fn table_reference_name(table_name: &str) -> &str {
    table_name.rsplit('.').next().unwrap_or(table_name)
}
