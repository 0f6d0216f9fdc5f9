use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::{
    parser::{
        clauses::TableReference,
        splitter::{enclosing_parentheses, split_top_level},
        KeywordMatch, ParseError, Phase, QueryParser, WordComparer,
    },
    structure::{Clause, Connector, JoinClause, JoinCondition, JoinType, Operator},
};

static JOIN_CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<left_table>[A-Za-z_][A-Za-z0-9_$]*)\.)?(?P<left_column>[A-Za-z_][A-Za-z0-9_$]*)\s*(?P<operator><>|!=|<=|>=|=|<|>)\s*(?:(?P<right_table>[A-Za-z_][A-Za-z0-9_$]*)\.)?(?P<right_column>[A-Za-z_][A-Za-z0-9_$]*)$",
    )
    .expect("join condition pattern")
});

enum JoinKeyword {
    Supported(JoinType),
    Cross,
    Natural,
}

pub struct JoinParser;

impl JoinParser {
    fn keywords(parser: &QueryParser) -> [(&'static WordComparer, JoinKeyword); 10] {
        let comparers = parser.comparers;
        [
            (&comparers.left_outer_join, JoinKeyword::Supported(JoinType::Left)),
            (&comparers.left_join, JoinKeyword::Supported(JoinType::Left)),
            (&comparers.right_outer_join, JoinKeyword::Supported(JoinType::Right)),
            (&comparers.right_join, JoinKeyword::Supported(JoinType::Right)),
            (&comparers.full_outer_join, JoinKeyword::Supported(JoinType::FullOuter)),
            (&comparers.full_join, JoinKeyword::Supported(JoinType::FullOuter)),
            (&comparers.inner_join, JoinKeyword::Supported(JoinType::Inner)),
            (&comparers.cross_join, JoinKeyword::Cross),
            (&comparers.natural, JoinKeyword::Natural),
            (&comparers.join, JoinKeyword::Supported(JoinType::Inner)),
        ]
    }

    fn join_matches(parser: &QueryParser) -> Vec<KeywordMatch> {
        let keywords = Self::keywords(parser);
        let comparers = keywords.iter().map(|(comparer, _)| *comparer).collect::<Vec<_>>();
        parser.top_level_matches(&comparers)
    }

    /// First join keyword at or after the cursor.
    pub fn next_join(parser: &QueryParser) -> Option<KeywordMatch> {
        Self::join_matches(parser).into_iter().next()
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Vec<JoinClause>, ParseError> {
        parser.next_non_whitespace();

        let keywords = Self::keywords(parser);
        let matches = Self::join_matches(parser);

        if let Some(first) = matches.first() {
            if first.start != parser.position {
                let text = parser.text_from_range(parser.position, first.start);
                return ParseError::at("Unexpected text before JOIN", Some(Clause::Join), text.trim_end(), parser.absolute(parser.position)).err();
            }
        }

        let mut joins: Vec<JoinClause> = vec![];
        for (position, found) in matches.iter().enumerate() {
            let end = matches.get(position + 1).map_or(parser.length, |next| next.start);
            let keyword = parser.text_from_range(found.start, found.end);

            let join_type = match &keywords[found.index].1 {
                JoinKeyword::Supported(join_type) => *join_type,
                JoinKeyword::Cross => {
                    return ParseError::at("CROSS JOIN is not supported", Some(Clause::Join), &keyword, parser.absolute(found.start)).err();
                },
                JoinKeyword::Natural => {
                    return ParseError::at("NATURAL JOIN is not supported", Some(Clause::Join), &keyword, parser.absolute(found.start)).err();
                },
            };

            let body = &parser.text()[found.end..end];
            let segment = QueryParser::with_offset(body, parser.absolute(found.end)).in_phase(Phase::Joins);
            joins.push(Self::parse_join(&segment, join_type)?);
        }

        parser.jump(parser.length);
        trace!(joins = joins.len(), "joins parsed");

        Ok(joins)
    }

    fn parse_join(segment: &QueryParser, join_type: JoinType) -> Result<JoinClause, ParseError> {
        let comparers = segment.comparers;

        if let Some(using) = segment.find_top_level(&comparers.using) {
            return ParseError::at("JOIN ... USING is not supported", Some(Clause::Join), "USING", segment.absolute(using.start)).err();
        }

        let Some(on) = segment.find_top_level(&comparers.on) else {
            return ParseError::at("JOIN requires an ON condition", Some(Clause::Join), segment.text().trim(), segment.absolute(0)).err();
        };

        let reference = TableReference::parse(&segment.text()[..on.start], Clause::Join, segment.absolute(0))?;
        let mut join = JoinClause::new(join_type, &reference.table_name);
        join.alias = reference.alias;

        let condition_text = &segment.text()[on.end..];
        let condition_offset = segment.absolute(on.end);

        let conditions = QueryParser::with_offset(condition_text, condition_offset);
        if let Some(or) = conditions.find_top_level(&comparers.or) {
            return ParseError::at("OR is not supported in JOIN conditions", Some(Clause::Join), "OR", conditions.absolute(or.start)).err();
        }

        for part in split_top_level(condition_text, &[Connector::And]) {
            let start = condition_offset + part.start;
            if part.expression.is_empty() {
                return ParseError::at("Missing JOIN condition", Some(Clause::Join), condition_text.trim(), condition_offset).err();
            }
            join.conditions.push(Self::parse_condition(&part.expression, start)?);
        }

        Ok(join)
    }

    /// `t1.col OP t2.col`, optionally wrapped in parentheses.
    pub fn parse_condition(text: &str, start: usize) -> Result<JoinCondition, ParseError> {
        let mut expression = text;
        let mut start = start;
        while let Some((inner_start, inner_end)) = enclosing_parentheses(expression) {
            start += inner_start;
            expression = &expression[inner_start..inner_end];
        }
        let leading = expression.len() - expression.trim_start().len();
        let expression = expression.trim();
        let start = start + leading;

        let Some(captures) = JOIN_CONDITION.captures(expression) else {
            return ParseError::at("Unsupported JOIN condition", Some(Clause::Join), expression, start).err();
        };

        let (Some(left_table), Some(right_table)) = (captures.name("left_table"), captures.name("right_table")) else {
            return ParseError::at("JOIN condition columns must be table qualified", Some(Clause::Join), expression, start).err();
        };

        let Some(operator) = Operator::from_symbol(&captures["operator"]) else {
            return ParseError::at("Unsupported JOIN operator", Some(Clause::Join), expression, start).err();
        };

        Ok(JoinCondition::new(
            left_table.as_str(),
            &captures["left_column"],
            operator,
            right_table.as_str(),
            &captures["right_column"],
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        parser::{clauses::JoinParser, Phase, QueryParser},
        structure::{JoinClause, JoinCondition, JoinType, Operator},
    };

    #[test]
    pub fn test_joins() {
        let text = "INNER JOIN TableB B ON A.id = B.id\nLEFT OUTER JOIN TableC AS C ON C.id = B.q_id AND C.kind <> B.kind JOIN d ON (d.id = C.id)";
        let mut parser = QueryParser::new(text).in_phase(Phase::Joins);

        let joins = JoinParser::parse(&mut parser).expect("Failed to parse joins");

        assert_eq!(
            joins,
            vec![
                JoinClause::new(JoinType::Inner, "TableB")
                    .with_alias("B")
                    .with_condition(JoinCondition::eq("A", "id", "B", "id")),
                JoinClause::new(JoinType::Left, "TableC")
                    .with_alias("C")
                    .with_condition(JoinCondition::eq("C", "id", "B", "q_id"))
                    .with_condition(JoinCondition::new("C", "kind", Operator::NotEq, "B", "kind")),
                JoinClause::new(JoinType::Inner, "d").with_condition(JoinCondition::eq("d", "id", "C", "id")),
            ]
        );
    }

    #[test]
    pub fn test_join_types() {
        let cases = [
            ("RIGHT JOIN b ON a.x = b.x", JoinType::Right),
            ("right outer join b ON a.x = b.x", JoinType::Right),
            ("FULL JOIN b ON a.x = b.x", JoinType::FullOuter),
            ("FULL OUTER JOIN b ON a.x = b.x", JoinType::FullOuter),
            ("LEFT JOIN b ON a.x = b.x", JoinType::Left),
        ];

        for (text, join_type) in cases {
            let mut parser = QueryParser::new(text);
            let joins = JoinParser::parse(&mut parser).expect("Failed to parse join");
            assert_eq!(joins[0].join_type, join_type);
        }
    }

    #[test]
    pub fn test_join_errors() {
        let cases = [
            ("CROSS JOIN b", "CROSS JOIN is not supported"),
            ("NATURAL JOIN b", "NATURAL JOIN is not supported"),
            ("JOIN b USING (id)", "JOIN ... USING is not supported"),
            ("JOIN b", "JOIN requires an ON condition"),
            ("JOIN b ON a.x = b.x OR a.y = b.y", "OR is not supported in JOIN conditions"),
            ("JOIN b ON x = y", "JOIN condition columns must be table qualified"),
            ("JOIN b ON a.x = 1", "Unsupported JOIN condition"),
            ("JOIN b ON a.x = b.x AND", "Missing JOIN condition"),
        ];

        for (text, message) in cases {
            let mut parser = QueryParser::new(text);
            match JoinParser::parse(&mut parser) {
                Ok(_) => panic!(),
                Err(err) => assert_eq!(err.message, message),
            }
        }
    }

    #[test]
    pub fn test_join_error_offsets() {
        let mut parser = QueryParser::with_offset("JOIN b ON a.x = 1", 20);

        let result = JoinParser::parse(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.text, "a.x = 1");
                assert_eq!(err.start, 30);
                assert_eq!(err.end, 37);
            },
        }
    }
}
