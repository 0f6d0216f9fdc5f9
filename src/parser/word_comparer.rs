use crate::parser::QueryParser;

/// Case-insensitive matcher for a keyword (or keyword sequence such as
/// `GROUP BY`) inside code spans.
#[derive(Debug, Default, Clone)]
pub struct WordComparer {
    pub word: String,
    parts: Vec<Vec<u8>>,
    symbol: bool,
}

impl WordComparer {
    /// Whitespace separated words; any whitespace run may separate them in the text.
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_uppercase(),
            parts: word.split_whitespace().map(|part| part.to_ascii_uppercase().into_bytes()).collect(),
            symbol: false,
        }
    }

    /// Operator such as `<=` that needs no word boundary around it.
    pub fn symbol(symbol: &str) -> Self {
        Self { word: symbol.to_string(), parts: vec![symbol.as_bytes().to_vec()], symbol: true }
    }

    /// Identifier bytes. A keyword glued to one of these is part of a name,
    /// e.g. `t.order`, `:limit` or `order_date`.
    pub fn is_word_char(ch: u8) -> bool {
        ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'$' || ch == b':' || ch == b'.' || ch >= 0x80
    }

    fn is_code_range(code: &[bool], start: usize, end: usize) -> bool {
        code[start..end].iter().all(|is_code| *is_code)
    }

    /// Length in bytes of the match starting at `position`, if any.
    pub fn matches_at(&self, bytes: &[u8], code: &[bool], position: usize) -> Option<usize> {
        if self.symbol {
            let word = &self.parts[0];
            let end = position + word.len();
            if end > bytes.len() || !Self::is_code_range(code, position, end) || bytes[position..end] != word[..] {
                return None;
            }
            return Some(word.len());
        }

        if position > 0 && Self::is_word_char(bytes[position - 1]) {
            return None;
        }

        let mut cursor = position;
        for (index, part) in self.parts.iter().enumerate() {
            if index > 0 {
                let gap = cursor;
                while cursor < bytes.len() && code[cursor] && bytes[cursor].is_ascii_whitespace() {
                    cursor += 1;
                }
                if cursor == gap {
                    return None;
                }
            }

            let end = cursor + part.len();
            if end > bytes.len() || !Self::is_code_range(code, cursor, end) || !bytes[cursor..end].eq_ignore_ascii_case(part) {
                return None;
            }
            cursor = end;
        }

        if cursor < bytes.len() && Self::is_word_char(bytes[cursor]) {
            return None;
        }

        Some(cursor - position)
    }

    pub fn compare(&self, parser: &QueryParser) -> bool {
        self.length_at(parser).is_some()
    }

    pub fn length_at(&self, parser: &QueryParser) -> Option<usize> {
        if parser.eof() {
            return None;
        }
        self.matches_at(parser.bytes(), parser.code(), parser.position)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{scanner::code_mask, WordComparer};

    fn matches(comparer: &WordComparer, text: &str, position: usize) -> Option<usize> {
        comparer.matches_at(text.as_bytes(), &code_mask(text), position)
    }

    #[test]
    pub fn test_word_comparer_case_insensitive() {
        let comparer = WordComparer::new("FROM");

        assert_eq!(matches(&comparer, "from t", 0), Some(4));
        assert_eq!(matches(&comparer, "FrOm\n", 0), Some(4));
        assert_eq!(matches(&comparer, "FROM", 0), Some(4));
    }

    #[test]
    pub fn test_word_comparer_word_boundaries() {
        let comparer = WordComparer::new("ORDER");

        assert_eq!(matches(&comparer, "orders", 0), None);
        assert_eq!(matches(&comparer, "x_order", 2), None);
        assert_eq!(matches(&comparer, "t.order", 2), None);
        assert_eq!(matches(&comparer, ":order", 1), None);
        assert_eq!(matches(&comparer, "(order)", 1), Some(5));
    }

    #[test]
    pub fn test_word_comparer_multi_word() {
        let comparer = WordComparer::new("GROUP BY");

        assert_eq!(matches(&comparer, "GROUP BY a", 0), Some(8));
        assert_eq!(matches(&comparer, "group \n\t by a", 0), Some(11));
        assert_eq!(matches(&comparer, "GROUPBY a", 0), None);
        assert_eq!(matches(&comparer, "GROUP BYE", 0), None);
    }

    #[test]
    pub fn test_word_comparer_ignores_literals() {
        let comparer = WordComparer::new("FROM");

        assert_eq!(matches(&comparer, "'FROM'", 1), None);
    }

    #[test]
    pub fn test_symbol_comparer() {
        let comparer = WordComparer::symbol("<=");

        assert_eq!(matches(&comparer, "a<=b", 1), Some(2));
        assert_eq!(matches(&comparer, "a<b", 1), None);
    }
}
