use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    parser::{
        clauses::ColumnRef,
        scanner::{scan, unquote},
        ParseError,
    },
    structure::{is_number_literal, Clause, Literal, Operand},
};

static PARAMETER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:[A-Za-z0-9_]+$").expect("parameter pattern"));

pub struct OperandParser;

impl OperandParser {
    /// Parses a right-hand value: `:param`, quoted string, number,
    /// TRUE/FALSE/NULL or `[table.]column`.
    pub fn parse(text: &str, clause: Clause, start: usize) -> Result<Operand, ParseError> {
        let trimmed = text.trim();
        let start = start + (text.len() - text.trim_start().len());

        if trimmed.is_empty() {
            return ParseError::at("Missing value", Some(clause), text, start).err();
        }

        if trimmed == "?" {
            return ParseError::at("Positional parameters are not supported, use :name", Some(clause), trimmed, start)
                .err();
        }

        if PARAMETER.is_match(trimmed) {
            return Ok(Operand::param(trimmed));
        }

        let spans = scan(trimmed);
        if let [span] = spans.as_slice() {
            if span.kind.is_literal() && span.terminated {
                return Ok(Operand::string(&unquote(trimmed)));
            }
        }

        if is_number_literal(trimmed) {
            return Ok(Operand::number(trimmed));
        }

        if trimmed.eq_ignore_ascii_case("TRUE") {
            return Ok(Operand::boolean(true));
        }
        if trimmed.eq_ignore_ascii_case("FALSE") {
            return Ok(Operand::boolean(false));
        }
        if trimmed.eq_ignore_ascii_case("NULL") {
            return Ok(Operand::Literal(Literal::Null));
        }

        match ColumnRef::parse(trimmed, clause, start) {
            Ok(column) if column.aggregate_function.is_none() && !column.is_wildcard() => {
                Ok(Operand::Column { table: column.table, column: column.column })
            },
            _ => ParseError::at("Unsupported value expression", Some(clause), trimmed, start).err(),
        }
    }
}
