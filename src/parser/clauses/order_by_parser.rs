use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    parser::{clauses::ColumnRef, splitter::split_list, ParseError, QueryParser},
    structure::{Clause, OrderByColumn, SortDirection},
};

static DIRECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^(?P<expression>.*?)(?:\s+(?P<direction>ASC|DESC))?$").expect("direction pattern"));

pub struct OrderByParser;

impl OrderByParser {
    pub fn parse_single(text: &str, start: usize) -> Result<OrderByColumn, ParseError> {
        let Some(captures) = DIRECTION.captures(text.trim()) else {
            return ParseError::at("Invalid order by", Some(Clause::OrderBy), text, start).err();
        };

        let direction = match captures.name("direction") {
            Some(direction) if direction.as_str().eq_ignore_ascii_case("DESC") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };

        let reference = ColumnRef::parse(&captures["expression"], Clause::OrderBy, start)?;
        if reference.is_wildcard() && reference.aggregate_function.is_none() {
            return ParseError::at("A wildcard cannot be ordered", Some(Clause::OrderBy), text, start).err();
        }

        Ok(OrderByColumn {
            table: reference.table,
            column: reference.column,
            aggregate_function: reference.aggregate_function,
            aggregate_distinct: reference.distinct,
            direction,
        })
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Vec<OrderByColumn>, ParseError> {
        let offset = parser.absolute(parser.position);

        let mut columns: Vec<OrderByColumn> = vec![];
        for item in split_list(parser.rest()) {
            let start = offset + item.start;
            if item.text.is_empty() {
                return ParseError::at("Empty ORDER BY item", Some(Clause::OrderBy), ",", start).err();
            }
            columns.push(Self::parse_single(&item.text, start)?);
        }

        parser.jump(parser.length);

        Ok(columns)
    }
}
