use tracing::trace;

use crate::parser::{ParseError, Phase, QueryParser};

/// Byte range of one clause body. For `LIMIT`/`OFFSET` the range starts at
/// the first keyword, since either may come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseRange {
    pub phase: Phase,
    pub keyword_start: usize,
    pub start: usize,
    pub end: usize,
}

pub struct ClauseLocator;

impl ClauseLocator {
    /// Finds the top-level clause keywords of a single SELECT, checking order
    /// and uniqueness. Leaves the parser at EOF.
    pub fn locate(parser: &mut QueryParser) -> Result<Vec<ClauseRange>, ParseError> {
        parser.next_non_whitespace();
        let comparers = parser.comparers;

        if !comparers.select.compare(parser) {
            let pivot = parser.position;
            while !parser.eof() && !parser.current().is_ascii_whitespace() {
                parser.next();
            }
            return ParseError::at(
                "Only SELECT statements are supported",
                None,
                &parser.text_from_pivot(pivot),
                parser.absolute(pivot),
            )
            .err();
        }

        let keywords = [
            &comparers.select,
            &comparers.from,
            &comparers.r#where,
            &comparers.group_by,
            &comparers.having,
            &comparers.order_by,
            &comparers.limit,
            &comparers.offset,
        ];
        let phases = [
            Phase::Projection,
            Phase::Collections,
            Phase::Criteria,
            Phase::Aggregates,
            Phase::Having,
            Phase::OrderBy,
            Phase::LimitAndOffset,
            Phase::LimitAndOffset,
        ];

        let matches = parser.top_level_matches(&keywords);
        let mut ranges: Vec<ClauseRange> = vec![];
        let mut seen = [false; 8];

        for (position, found) in matches.iter().enumerate() {
            let phase = phases[found.index];
            let end = matches.get(position + 1).map_or(parser.length, |next| next.start);
            let keyword = parser.text_from_range(found.start, found.end);
            let name = &keywords[found.index].word;

            if seen[found.index] {
                return ParseError::at(
                    &format!("{} appears more than once", name),
                    phase.clause(),
                    &keyword,
                    parser.absolute(found.start),
                )
                .err();
            }
            seen[found.index] = true;

            if let Some(previous) = ranges.last_mut() {
                if phase == Phase::LimitAndOffset && previous.phase == Phase::LimitAndOffset {
                    previous.end = end;
                    continue;
                }
                if phase <= previous.phase {
                    return ParseError::at(
                        &format!("{} is out of order", name),
                        phase.clause(),
                        &keyword,
                        parser.absolute(found.start),
                    )
                    .err();
                }
            }

            let start = if phase == Phase::LimitAndOffset { found.start } else { found.end };
            if phase != Phase::LimitAndOffset && parser.text_from_range(start, end).trim().is_empty() {
                return ParseError::at(
                    &format!("Empty {} clause", name),
                    phase.clause(),
                    &keyword,
                    parser.absolute(found.start),
                )
                .err();
            }

            trace!(?phase, start, end, "clause located");
            ranges.push(ClauseRange { phase, keyword_start: found.start, start, end });
        }

        if !ranges.iter().any(|range| range.phase == Phase::Collections) {
            return ParseError::at("Missing FROM clause", None, parser.text().trim_end(), parser.absolute(0)).err();
        }

        parser.jump(parser.length);
        parser.phase = Phase::EOF;

        Ok(ranges)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ClauseLocator, Phase, QueryParser};

    #[test]
    pub fn test_locate_clauses() {
        let text = "SELECT a FROM t WHERE b = 1 GROUP BY a HAVING COUNT(*) > 1 ORDER BY a OFFSET 5 LIMIT 10";
        let mut parser = QueryParser::new(text);

        let ranges = ClauseLocator::locate(&mut parser).expect("Failed to locate clauses");

        let phases = ranges.iter().map(|range| range.phase).collect::<Vec<_>>();
        assert_eq!(
            phases,
            vec![
                Phase::Projection,
                Phase::Collections,
                Phase::Criteria,
                Phase::Aggregates,
                Phase::Having,
                Phase::OrderBy,
                Phase::LimitAndOffset
            ]
        );
        assert_eq!(&text[ranges[0].start..ranges[0].end], " a ");
        assert_eq!(&text[ranges[6].start..ranges[6].end], "OFFSET 5 LIMIT 10");
        assert_eq!(parser.phase, Phase::EOF);
    }

    #[test]
    pub fn test_locate_ignores_nested_and_literal_keywords() {
        let text = "SELECT COUNT(a) FROM t WHERE name = 'x FROM y' AND t.order = 1";
        let mut parser = QueryParser::new(text);

        let ranges = ClauseLocator::locate(&mut parser).expect("Failed to locate clauses");

        assert_eq!(ranges.len(), 3);
    }

    #[test]
    pub fn test_locate_out_of_order() {
        let mut parser = QueryParser::new("SELECT a FROM t ORDER BY a WHERE b = 1");

        let result = ClauseLocator::locate(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.text, "WHERE");
                assert_eq!(err.start, 27);
                assert_eq!(err.end, 32);
            },
        }
    }

    #[test]
    pub fn test_locate_repeated_limit() {
        let mut parser = QueryParser::new("SELECT a FROM t LIMIT 1 LIMIT 2");

        let result = ClauseLocator::locate(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "LIMIT appears more than once"),
        }
    }

    #[test]
    pub fn test_locate_missing_from() {
        let mut parser = QueryParser::new("SELECT 1");

        let result = ClauseLocator::locate(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Missing FROM clause"),
        }
    }

    #[test]
    pub fn test_locate_not_a_select() {
        let mut parser = QueryParser::new("  DELETE FROM t");

        let result = ClauseLocator::locate(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.text, "DELETE");
                assert_eq!(err.start, 2);
            },
        }
    }

    #[test]
    pub fn test_locate_empty_clause() {
        let mut parser = QueryParser::new("SELECT a FROM t WHERE ");

        let result = ClauseLocator::locate(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Empty WHERE clause"),
        }
    }
}
