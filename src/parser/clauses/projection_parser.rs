use crate::{
    parser::{
        clauses::{split_alias, ColumnRef},
        splitter::split_list,
        ParseError, QueryParser,
    },
    structure::{identifiers::is_valid_identifier, Clause, SelectColumn},
};

pub struct ProjectionParser;

impl ProjectionParser {
    /// Parses the SELECT list. Returns the statement level DISTINCT flag and
    /// the columns in output order.
    pub fn parse(parser: &mut QueryParser) -> Result<(bool, Vec<SelectColumn>), ParseError> {
        parser.next_non_whitespace();
        let comparers = parser.comparers;
        let distinct = parser.consume(&comparers.distinct);

        let offset = parser.absolute(parser.position);
        let items = split_list(parser.rest());

        let mut columns: Vec<SelectColumn> = vec![];
        for item in items {
            let start = offset + item.start;
            if item.text.is_empty() {
                return ParseError::at("Empty select item", Some(Clause::Select), ",", start).err();
            }
            columns.push(Self::parse_item(&item.text, start)?);
        }

        parser.jump(parser.length);

        Ok((distinct, columns))
    }

    pub fn parse_item(text: &str, start: usize) -> Result<SelectColumn, ParseError> {
        let (expression, alias) = split_alias(text);
        let reference = ColumnRef::parse(expression, Clause::Select, start)?;

        if let Some(alias) = alias {
            if !is_valid_identifier(alias) {
                return ParseError::at(&format!("Invalid alias '{}'", alias), Some(Clause::Select), text, start).err();
            }
            if reference.is_wildcard() && reference.aggregate_function.is_none() {
                return ParseError::at("A wildcard cannot have an alias", Some(Clause::Select), text, start).err();
            }
        }

        Ok(SelectColumn {
            table: reference.table,
            column: reference.column,
            aggregate_function: reference.aggregate_function,
            alias: alias.map(str::to_string),
            distinct: reference.distinct,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        parser::{clauses::ProjectionParser, QueryParser},
        structure::{AggregateFunction, SelectColumn},
    };

    #[test]
    pub fn test_projection() {
        let text = " b.*, a.full_name as name, COUNT(*) as TotBy, *";
        let mut parser = QueryParser::new(text);

        let (distinct, columns) = ProjectionParser::parse(&mut parser).expect("Failed to parse projection");

        assert!(!distinct);
        assert_eq!(
            columns,
            vec![
                SelectColumn::wildcard().with_table("b"),
                SelectColumn::new("full_name").with_table("a").with_alias("name"),
                SelectColumn::aggregate(AggregateFunction::Count, "*").with_alias("TotBy"),
                SelectColumn::wildcard(),
            ]
        );
        assert!(parser.eof());
    }

    #[test]
    pub fn test_projection_distinct() {
        let mut parser = QueryParser::new(" DISTINCT city, COUNT(DISTINCT id) total");

        let (distinct, columns) = ProjectionParser::parse(&mut parser).expect("Failed to parse projection");

        assert!(distinct);
        assert_eq!(columns.len(), 2);
        assert!(columns[1].distinct);
        assert_eq!(columns[1].alias.as_deref(), Some("total"));
    }

    #[test]
    pub fn test_projection_column_named_like_keyword_prefix() {
        let mut parser = QueryParser::new(" distinct_id");

        let (distinct, columns) = ProjectionParser::parse(&mut parser).expect("Failed to parse projection");

        assert!(!distinct);
        assert_eq!(columns[0].column, "distinct_id");
    }

    #[test]
    pub fn test_projection_errors() {
        let mut parser = QueryParser::with_offset(" a, , b", 6);

        let result = ProjectionParser::parse(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.message, "Empty select item");
                assert_eq!(err.start, 10);
            },
        }
    }

    #[test]
    pub fn test_projection_invalid_alias() {
        let mut parser = QueryParser::new("a AS");

        let result = ProjectionParser::parse(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Invalid alias 'AS'"),
        }
    }
}
