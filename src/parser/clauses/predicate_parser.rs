use crate::{
    parser::{
        clauses::{ColumnRef, OperandParser},
        scanner::code_mask,
        splitter::{enclosing_parentheses, split_list, split_top_level},
        ParseError, QueryParser, COMPARERS,
    },
    structure::{Clause, Connector, Operator, WhereCondition},
};

pub struct PredicateParser;

impl PredicateParser {
    /// Strips outer parentheses and leading `NOT`s, returning the remaining
    /// text, its absolute offset and whether an odd number of `NOT`s was seen.
    fn peel(text: &str, start: usize) -> (&str, usize, bool) {
        let mut body = text;
        let mut start = start;
        let mut negated = false;

        loop {
            start += body.len() - body.trim_start().len();
            body = body.trim();

            if let Some((inner_start, inner_end)) = enclosing_parentheses(body) {
                start += inner_start;
                body = &body[inner_start..inner_end];
                continue;
            }

            if let Some(length) = COMPARERS.not.matches_at(body.as_bytes(), &code_mask(body), 0) {
                negated = !negated;
                start += length;
                body = &body[length..];
                continue;
            }

            return (body, start, negated);
        }
    }

    /// Parses one top-level predicate of WHERE or HAVING. `start` is the
    /// absolute offset of `text`.
    pub fn parse(text: &str, start: usize, clause: Clause) -> Result<WhereCondition, ParseError> {
        let (body, body_start, mut negated) = Self::peel(text, start);

        if split_top_level(body, &[Connector::And, Connector::Or]).len() > 1 {
            return ParseError::at("Nested AND/OR groups are not supported", Some(clause), body, body_start).err();
        }

        let parser = QueryParser::with_offset(body, body_start);
        let comparers = parser.comparers;
        let operators = [
            &comparers.is_not_null,
            &comparers.is_null,
            &comparers.not,
            &comparers.between,
            &comparers.r#in,
            &comparers.like,
            &comparers.not_equal_b,
            &comparers.not_equal_c,
            &comparers.greater_than_or_equal,
            &comparers.less_than_or_equal,
            &comparers.equal,
            &comparers.greater_than,
            &comparers.less_than,
        ];

        let Some(found) = parser.top_level_matches(&operators).into_iter().next() else {
            return ParseError::at("Missing comparison operator", Some(clause), body, body_start).err();
        };

        let (operator, operator_end) = match found.index {
            0 => (Operator::IsNotNull, found.end),
            1 => (Operator::IsNull, found.end),
            2 => {
                let rest = &body[found.end..];
                let after = found.end + (rest.len() - rest.trim_start().len());
                let code = parser.code();
                let negatable = [
                    (&comparers.between, Operator::Between),
                    (&comparers.r#in, Operator::In),
                    (&comparers.like, Operator::Like),
                ];
                let Some((operator, length)) = negatable.iter().find_map(|(comparer, operator)| {
                    comparer.matches_at(parser.bytes(), code, after).map(|length| (*operator, length))
                }) else {
                    return ParseError::at("Unsupported use of NOT", Some(clause), body, body_start).err();
                };
                negated = !negated;
                (operator, after + length)
            },
            3 => (Operator::Between, found.end),
            4 => (Operator::In, found.end),
            5 => (Operator::Like, found.end),
            6 | 7 => (Operator::NotEq, found.end),
            8 => (Operator::GtEq, found.end),
            9 => (Operator::LtEq, found.end),
            10 => (Operator::Eq, found.end),
            11 => (Operator::Gt, found.end),
            _ => (Operator::Lt, found.end),
        };

        let left = &body[..found.start];
        let column = ColumnRef::parse(left, clause, body_start)?;
        if column.is_wildcard() && column.aggregate_function.is_none() {
            return ParseError::at("A wildcard cannot be used in a condition", Some(clause), left.trim(), body_start).err();
        }
        if clause == Clause::Where && column.aggregate_function.is_some() {
            return ParseError::at(
                "Aggregate functions are not allowed in WHERE, use HAVING",
                Some(clause),
                left.trim(),
                body_start,
            )
            .err();
        }

        let mut condition = WhereCondition::new(&column.column, operator).with_negated(negated);
        condition.table = column.table;
        condition.aggregate_function = column.aggregate_function;
        condition.aggregate_distinct = column.distinct;

        let right = &body[operator_end..];
        let right_start = body_start + operator_end;

        match operator {
            Operator::IsNull | Operator::IsNotNull => {
                if !right.trim().is_empty() {
                    return ParseError::at("Unexpected text after IS NULL", Some(clause), right.trim(), right_start).err();
                }
            },
            Operator::Between => {
                let bounds = QueryParser::with_offset(right, right_start);
                let Some(and) = bounds.find_top_level(&comparers.and) else {
                    return ParseError::at("BETWEEN requires two bounds", Some(clause), body, body_start).err();
                };
                condition.min_value = Some(OperandParser::parse(&right[..and.start], clause, right_start)?);
                condition.max_value = Some(OperandParser::parse(&right[and.end..], clause, right_start + and.end)?);
            },
            Operator::In => {
                let Some((inner_start, inner_end)) = enclosing_parentheses(right) else {
                    return ParseError::at("IN requires a parenthesized list", Some(clause), right.trim(), right_start).err();
                };
                let items = split_list(&right[inner_start..inner_end]);
                if items.iter().all(|item| item.text.is_empty()) {
                    return ParseError::at("Empty IN list", Some(clause), right.trim(), right_start).err();
                }
                for item in items {
                    let item_start = right_start + inner_start + item.start;
                    condition.values.push(OperandParser::parse(&item.text, clause, item_start)?);
                }
            },
            _ => condition.value = Some(OperandParser::parse(right, clause, right_start)?),
        }

        Ok(condition)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        parser::clauses::PredicateParser,
        structure::{AggregateFunction, Clause, Operand, Operator, WhereCondition},
    };

    fn parse(text: &str) -> WhereCondition {
        PredicateParser::parse(text, 0, Clause::Where).expect("Failed to parse predicate")
    }

    #[test]
    pub fn test_predicate_comparisons() {
        assert_eq!(parse("A.Age > 16"), WhereCondition::compare("Age", Operator::Gt, Operand::number(16)).with_table("A"));
        assert_eq!(parse("a>=:min"), WhereCondition::compare("a", Operator::GtEq, Operand::param("min")));
        assert_eq!(parse("a <= 1"), WhereCondition::compare("a", Operator::LtEq, Operand::number(1)));
        assert_eq!(parse("a != 'x'"), WhereCondition::compare("a", Operator::NotEq, Operand::string("x")));
        assert_eq!(parse("a <> b.c"), WhereCondition::compare("a", Operator::NotEq, Operand::column(Some("b"), "c")));
        assert_eq!(
            parse("B.city like \"Matosinhos\""),
            WhereCondition::like("city", Operand::string("Matosinhos")).with_table("B")
        );
    }

    #[test]
    pub fn test_predicate_between_in_null() {
        assert_eq!(parse("age BETWEEN 18 AND 65"), WhereCondition::between("age", Operand::number(18), Operand::number(65)));
        assert_eq!(
            parse("status IN ('a', :other, 3)"),
            WhereCondition::in_list("status", vec![Operand::string("a"), Operand::param("other"), Operand::number(3)])
        );
        assert_eq!(parse("deleted_at IS NULL"), WhereCondition::is_null("deleted_at"));
        assert_eq!(parse("u.email is not null"), WhereCondition::is_not_null("email").with_table("u"));
    }

    #[test]
    pub fn test_predicate_negations() {
        assert_eq!(
            parse("a NOT BETWEEN :lo AND :hi"),
            WhereCondition::between("a", Operand::param("lo"), Operand::param("hi")).negate()
        );
        assert_eq!(parse("a NOT IN (1)"), WhereCondition::in_list("a", vec![Operand::number(1)]).negate());
        assert_eq!(parse("a NOT LIKE '%x'"), WhereCondition::like("a", Operand::string("%x")).negate());
        assert_eq!(parse("NOT (a = 1)"), WhereCondition::compare("a", Operator::Eq, Operand::number(1)).negate());
        assert_eq!(parse("((a = 1))"), WhereCondition::compare("a", Operator::Eq, Operand::number(1)));
        assert_eq!(parse("NOT a NOT IN (1)"), WhereCondition::in_list("a", vec![Operand::number(1)]));
    }

    #[test]
    pub fn test_predicate_having_aggregate() {
        let condition = PredicateParser::parse("COUNT(DISTINCT o.id) > 3", 0, Clause::Having)
            .expect("Failed to parse having predicate");

        assert_eq!(
            condition,
            WhereCondition::compare("id", Operator::Gt, Operand::number(3))
                .with_table("o")
                .with_aggregate(AggregateFunction::Count)
                .with_aggregate_distinct()
        );
    }

    #[test]
    pub fn test_predicate_errors() {
        let cases = [
            ("COUNT(*) > 3", "Aggregate functions are not allowed in WHERE, use HAVING"),
            ("(a = 1 OR b = 2)", "Nested AND/OR groups are not supported"),
            ("a", "Missing comparison operator"),
            ("a BETWEEN 1", "BETWEEN requires two bounds"),
            ("a IN ()", "Empty IN list"),
            ("a IN :list", "IN requires a parenthesized list"),
            ("a NOT = 1", "Unsupported use of NOT"),
            ("a IS NULL 1", "Unexpected text after IS NULL"),
            ("* = 1", "A wildcard cannot be used in a condition"),
            ("a = ?", "Positional parameters are not supported, use :name"),
        ];

        for (text, message) in cases {
            match PredicateParser::parse(text, 0, Clause::Where) {
                Ok(_) => panic!(),
                Err(err) => assert_eq!(err.message, message),
            }
        }
    }

    #[test]
    pub fn test_predicate_error_offsets() {
        let result = PredicateParser::parse(" (a = UPPER(b))", 40, Clause::Where);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.text, "UPPER(b)");
                assert_eq!(err.start, 46);
                assert_eq!(err.end, 54);
            },
        }
    }
}
