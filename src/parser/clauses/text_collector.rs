use crate::parser::{ParseError, QueryParser, WordComparer};

pub struct TextCollector;

impl TextCollector {
    /// Collects one word (identifier, number or `:param`) at the cursor.
    pub fn collect(parser: &mut QueryParser) -> Result<String, ParseError> {
        let pivot = parser.position;
        while !parser.eof() && !Self::is_delimiter(parser.current()) {
            if !WordComparer::is_word_char(parser.current() as u8) {
                return Err(ParseError::new("Invalid text", pivot, parser));
            }
            parser.next();
        }
        Ok(parser.text_from_pivot(pivot))
    }

    fn is_delimiter(current: char) -> bool {
        current.is_ascii_whitespace() || matches!(current, ',' | '(' | ')' | ';')
    }
}
