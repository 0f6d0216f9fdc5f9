use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    parser::{clauses::JoinParser, splitter::split_list, ParseError, Phase, QueryParser},
    structure::{
        identifiers::{is_valid_identifier, is_valid_table_name},
        Clause, FromTable,
    },
};

static TABLE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)^(?P<table>[A-Za-z_][A-Za-z0-9_$]*(?:\.[A-Za-z_][A-Za-z0-9_$]*)?)(?:\s+(?:AS\s+)?(?P<alias>[A-Za-z_][A-Za-z0-9_$]*))?$",
    )
    .expect("table reference pattern")
});

/// `name [[AS] alias]`, as written in FROM and JOIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    pub table_name: String,
    pub alias: Option<String>,
}

impl TableReference {
    pub fn parse(text: &str, clause: Clause, start: usize) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        let start = start + (text.len() - text.trim_start().len());

        if trimmed.starts_with('(') {
            return ParseError::at("Derived tables are not supported", Some(clause), trimmed, start).err();
        }

        let Some(captures) = TABLE_REFERENCE.captures(trimmed) else {
            return ParseError::at("Invalid table reference", Some(clause), trimmed, start).err();
        };

        let table_name = captures["table"].to_string();
        if !is_valid_table_name(&table_name) {
            return ParseError::at(&format!("Invalid table name '{}'", table_name), Some(clause), trimmed, start).err();
        }

        let alias = captures.name("alias").map(|alias| alias.as_str().to_string());
        if let Some(alias) = &alias {
            if !is_valid_identifier(alias) {
                return ParseError::at(&format!("Invalid alias '{}'", alias), Some(clause), trimmed, start).err();
            }
        }

        Ok(Self { table_name, alias })
    }
}

pub struct CollectionsParser;

impl CollectionsParser {
    /// Parses the comma separated base tables of FROM and stops in front of
    /// the first JOIN, switching the parser to [`Phase::Joins`].
    pub fn parse(parser: &mut QueryParser) -> Result<Vec<FromTable>, ParseError> {
        parser.next_non_whitespace();

        let end = JoinParser::next_join(parser).map_or(parser.length, |found| found.start);
        let offset = parser.absolute(parser.position);
        let text = parser.text_from_range(parser.position, end);

        let mut tables: Vec<FromTable> = vec![];
        for item in split_list(&text) {
            let start = offset + item.start;
            if item.text.is_empty() {
                return ParseError::at("Missing table name", Some(Clause::From), &text, offset).err();
            }

            let reference = TableReference::parse(&item.text, Clause::From, start)?;
            tables.push(FromTable { table_name: reference.table_name, alias: reference.alias });
        }

        parser.jump(end - parser.position);
        parser.phase = Phase::Joins;

        Ok(tables)
    }
}
