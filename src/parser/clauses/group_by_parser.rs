use crate::{
    parser::{clauses::ColumnRef, splitter::split_list, ParseError, QueryParser},
    structure::{Clause, GroupByColumn},
};

pub struct GroupByParser;

impl GroupByParser {
    pub fn parse(parser: &mut QueryParser) -> Result<Vec<GroupByColumn>, ParseError> {
        let offset = parser.absolute(parser.position);

        let mut columns: Vec<GroupByColumn> = vec![];
        for item in split_list(parser.rest()) {
            let start = offset + item.start;
            if item.text.is_empty() {
                return ParseError::at("Empty GROUP BY item", Some(Clause::GroupBy), ",", start).err();
            }

            let reference = ColumnRef::parse(&item.text, Clause::GroupBy, start)?;
            if reference.aggregate_function.is_some() {
                return ParseError::at(
                    "Aggregate functions are not allowed in GROUP BY",
                    Some(Clause::GroupBy),
                    &item.text,
                    start,
                )
                .err();
            }
            if reference.is_wildcard() {
                return ParseError::at("A wildcard cannot be grouped", Some(Clause::GroupBy), &item.text, start).err();
            }

            columns.push(GroupByColumn { table: reference.table, column: reference.column, aggregate_function: None });
        }

        parser.jump(parser.length);

        Ok(columns)
    }
}
