use crate::{
    parser::{clauses::PredicateParser, splitter::split_top_level, ParseError, QueryParser},
    structure::{Clause, Connector, WhereCondition},
};

/// WHERE and HAVING share one grammar; the parser phase tells them apart.
pub struct WhereParser;

impl WhereParser {
    pub fn parse(parser: &mut QueryParser) -> Result<Vec<WhereCondition>, ParseError> {
        let clause = parser.phase.clause().unwrap_or(Clause::Where);
        let text = parser.rest();
        let offset = parser.absolute(parser.position);

        let mut conditions: Vec<WhereCondition> = vec![];
        for part in split_top_level(text, &[Connector::And, Connector::Or]) {
            if part.expression.is_empty() {
                let connector = part.connector.map_or("AND", |connector| connector.keyword());
                return ParseError::at(
                    &format!("Missing condition around {}", connector),
                    Some(clause),
                    text.trim(),
                    offset + (text.len() - text.trim_start().len()),
                )
                .err();
            }

            let condition = PredicateParser::parse(&part.expression, offset + part.start, clause)?;
            conditions.push(condition.with_connector(part.connector.unwrap_or_default()));
        }

        parser.jump(parser.length);

        Ok(conditions)
    }
}
