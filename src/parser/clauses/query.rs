use tracing::debug;

use crate::{
    parser::{
        clauses::{
            CollectionsParser, GroupByParser, JoinParser, LimitAndOffsetParser, OrderByParser, ProjectionParser,
            WhereParser,
        },
        scanner::{mask_comments, Scanner, SpanKind},
        ClauseLocator, ParseError, Phase, QueryParser, WordComparer, COMPARERS,
    },
    structure::QueryStructure,
};

pub struct StructureParser;

impl StructureParser {
    pub fn parse(sql: &str) -> Result<QueryStructure, ParseError> {
        Self::check_terminated(sql)?;

        let masked = mask_comments(sql);
        let statement = Self::single_statement(&masked)?;
        Self::check_parentheses(statement)?;
        Self::check_unsupported(statement)?;

        let mut parser = QueryParser::new(statement);
        let ranges = ClauseLocator::locate(&mut parser)?;

        let mut structure = QueryStructure::new();
        for range in ranges {
            let mut clause = QueryParser::with_offset(&statement[range.start..range.end], range.start).in_phase(range.phase);

            match range.phase {
                Phase::Projection => {
                    let (distinct, columns) = ProjectionParser::parse(&mut clause)?;
                    structure.distinct = distinct;
                    structure.select_columns = columns;
                },
                Phase::Collections => {
                    structure.from_tables = CollectionsParser::parse(&mut clause)?;
                    structure.joins = JoinParser::parse(&mut clause)?;
                },
                Phase::Criteria => structure.where_conditions = WhereParser::parse(&mut clause)?,
                Phase::Aggregates => structure.group_by_columns = GroupByParser::parse(&mut clause)?,
                Phase::Having => structure.having_conditions = WhereParser::parse(&mut clause)?,
                Phase::OrderBy => structure.order_by_columns = OrderByParser::parse(&mut clause)?,
                Phase::LimitAndOffset => {
                    let (limit, offset) = LimitAndOffsetParser::parse(&mut clause)?;
                    structure.limit = limit;
                    structure.offset = offset;
                },
                Phase::Joins | Phase::EOF => {},
            }
        }

        debug!(
            columns = structure.select_columns.len(),
            tables = structure.from_tables.len(),
            joins = structure.joins.len(),
            conditions = structure.where_conditions.len(),
            "query parsed"
        );

        Ok(structure)
    }

    fn check_terminated(sql: &str) -> Result<(), ParseError> {
        match Scanner::new(sql).find(|span| !span.terminated) {
            Some(span) => {
                let message = match span.kind {
                    SpanKind::BlockComment => "Unterminated block comment",
                    SpanKind::DoubleQuoted => "Unterminated quoted identifier",
                    _ => "Unterminated string literal",
                };
                ParseError::at(message, None, span.text(sql), span.start).err()
            },
            None => Ok(()),
        }
    }

    /// Statement text without a trailing `;`.
    fn single_statement(masked: &str) -> Result<&str, ParseError> {
        let parser = QueryParser::new(masked);
        let Some(terminator) = (0..masked.len()).find(|position| parser.is_code(*position) && masked.as_bytes()[*position] == b';')
        else {
            return Ok(masked);
        };

        let trailing = &masked[terminator + 1..];
        if !trailing.trim().is_empty() {
            let start = terminator + 1 + (trailing.len() - trailing.trim_start().len());
            return ParseError::at("Multiple statements are not supported", None, trailing.trim(), start).err();
        }

        Ok(&masked[..terminator])
    }

    fn check_parentheses(statement: &str) -> Result<(), ParseError> {
        let parser = QueryParser::new(statement);
        let mut open: Vec<usize> = vec![];

        for (position, byte) in statement.bytes().enumerate() {
            if !parser.is_code(position) {
                continue;
            }
            match byte {
                b'(' => open.push(position),
                b')' if open.pop().is_none() => {
                    return ParseError::at("Unbalanced parentheses", None, ")", position).err();
                },
                _ => {},
            }
        }

        match open.last() {
            Some(position) => ParseError::at("Unbalanced parentheses", None, "(", *position).err(),
            None => Ok(()),
        }
    }

    fn matches_anywhere(parser: &QueryParser, comparer: &WordComparer) -> Vec<(usize, usize)> {
        let mut found: Vec<(usize, usize)> = vec![];
        let mut position = 0;
        while position < parser.length {
            match comparer.matches_at(parser.bytes(), parser.code(), position) {
                Some(length) => {
                    found.push((position, position + length));
                    position += length;
                },
                None => position += 1,
            }
        }
        found
    }

    fn check_unsupported(statement: &str) -> Result<(), ParseError> {
        let mut parser = QueryParser::new(statement);
        parser.next_non_whitespace();

        let comparers = parser.comparers;
        if comparers.with.compare(&parser) {
            return ParseError::at("Common table expressions (WITH) are not supported", None, "WITH", parser.position).err();
        }
        for comparer in [&comparers.insert, &comparers.update, &comparers.delete] {
            if comparer.compare(&parser) {
                return ParseError::at("Only SELECT statements are supported", None, &comparer.word, parser.position).err();
            }
        }

        let checks: [(&WordComparer, &str, usize); 5] = [
            (&COMPARERS.union, "Set operations (UNION/INTERSECT/EXCEPT) are not supported", 0),
            (&COMPARERS.intersect, "Set operations (UNION/INTERSECT/EXCEPT) are not supported", 0),
            (&COMPARERS.except, "Set operations (UNION/INTERSECT/EXCEPT) are not supported", 0),
            (&COMPARERS.over, "Window functions (OVER) are not supported", 0),
            (&COMPARERS.select, "Subqueries are not supported", 1),
        ];
        for (comparer, message, allowed) in checks {
            if let Some((start, end)) = Self::matches_anywhere(&parser, comparer).get(allowed) {
                return ParseError::at(message, None, &statement[*start..*end], *start).err();
            }
        }

        if let Some(position) = (0..statement.len()).find(|position| parser.is_code(*position) && statement.as_bytes()[*position] == b'?') {
            return ParseError::at("Positional parameters are not supported, use :name", None, "?", position).err();
        }

        Ok(())
    }
}

/// Reverse engineers a single SELECT statement into its structure.
pub fn parse_query(sql: &str) -> Result<QueryStructure, ParseError> {
    StructureParser::parse(sql)
}

impl TryFrom<&str> for QueryStructure {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        StructureParser::parse(value)
    }
}
