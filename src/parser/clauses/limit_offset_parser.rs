use crate::parser::{clauses::TextCollector, ParseError, QueryParser};

pub struct LimitAndOffsetParser;

impl LimitAndOffsetParser {
    /// Parses `LIMIT n`, `OFFSET n` or both, in either order.
    pub fn parse(parser: &mut QueryParser) -> Result<(Option<u64>, Option<u64>), ParseError> {
        let comparers = parser.comparers;
        let mut limit = None;
        let mut offset = None;

        parser.next_non_whitespace();
        while !parser.eof() {
            if parser.consume(&comparers.limit) {
                limit = Some(Self::parse_value(parser, "LIMIT")?);
            } else if parser.consume(&comparers.offset) {
                offset = Some(Self::parse_value(parser, "OFFSET")?);
            } else {
                return ParseError::new("Invalid LIMIT/OFFSET", parser.position, parser).err();
            }
            parser.next_non_whitespace();
        }

        Ok((limit, offset))
    }

    fn parse_value(parser: &mut QueryParser, keyword: &str) -> Result<u64, ParseError> {
        parser.next_non_whitespace();
        let pivot = parser.position;

        if parser.current() == '?' {
            parser.next();
            return ParseError::new("Positional parameters are not supported, use :name", pivot, parser).err();
        }

        let value = TextCollector::collect(parser)?;

        if value.starts_with(':') {
            return ParseError::new(&format!("Parameterized {} is not supported", keyword), pivot, parser).err();
        }

        if parser.current() == ',' {
            return ParseError::new(&format!("{} a, b is not supported, use LIMIT .. OFFSET ..", keyword), pivot, parser).err();
        }

        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return ParseError::new(&format!("Invalid {}", keyword), pivot, parser).err();
        }

        value.parse::<u64>().map_err(|_| ParseError::new(&format!("Invalid {}", keyword), pivot, parser))
    }
}
