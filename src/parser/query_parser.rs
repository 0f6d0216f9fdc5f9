use crate::parser::{
    scanner::{Scanner, Span},
    Phase, QueryComparers, WordComparer, COMPARERS,
};

/// Keyword found by [`QueryParser::top_level_matches`]; `index` points into
/// the comparer slice that was searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

/// Byte cursor over a SQL fragment that knows which bytes are code.
///
/// `offset` is the position of the fragment inside the full statement so
/// errors always point into the text the caller supplied.
#[derive(Debug)]
pub struct QueryParser<'a> {
    pub position: usize,
    pub length: usize,
    pub phase: Phase,
    pub comparers: &'static QueryComparers,
    text: &'a str,
    bytes: &'a [u8],
    code: Vec<bool>,
    offset: usize,
}

impl<'a> QueryParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_offset(text, 0)
    }

    pub fn with_offset(text: &'a str, offset: usize) -> Self {
        let spans: Vec<Span> = Scanner::new(text).collect();
        let mut code = vec![false; text.len()];
        for span in spans.iter().filter(|span| span.kind.is_code()) {
            code[span.start..span.end].fill(true);
        }

        Self {
            position: 0,
            length: text.len(),
            phase: Phase::default(),
            comparers: &COMPARERS,
            text,
            bytes: text.as_bytes(),
            code,
            offset,
        }
    }

    pub fn in_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn code(&self) -> &[bool] {
        &self.code
    }

    pub fn absolute(&self, position: usize) -> usize {
        self.offset + position.min(self.length)
    }

    pub fn eof(&self) -> bool {
        self.position >= self.length
    }

    pub fn current(&self) -> char {
        if self.position < self.length {
            return self.bytes[self.position] as char;
        }

        '\0'
    }

    pub fn peek(&self, ahead: usize) -> char {
        self.bytes.get(self.position + ahead).map_or('\0', |byte| *byte as char)
    }

    pub fn is_code(&self, position: usize) -> bool {
        self.code.get(position).copied().unwrap_or(false)
    }

    pub fn next(&mut self) {
        if self.position < self.length {
            self.position += 1;
        }
    }

    pub fn next_non_whitespace(&mut self) {
        while !self.eof() && self.current().is_ascii_whitespace() {
            self.next();
        }
    }

    pub fn jump(&mut self, ahead: usize) {
        self.position = (self.position + ahead).min(self.length);
    }

    /// Advances past `comparer` when it matches at the cursor.
    pub fn consume(&mut self, comparer: &WordComparer) -> bool {
        match comparer.length_at(self) {
            Some(length) => {
                self.jump(length);
                true
            },
            None => false,
        }
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.length);
        let start = start.min(end);
        String::from_utf8_lossy(&self.bytes[start..end]).into_owned()
    }

    pub fn text_from_pivot(&self, pivot: usize) -> String {
        self.text_from_range(pivot, self.position)
    }

    /// Unparsed remainder of the fragment.
    pub fn rest(&self) -> &'a str {
        self.text.get(self.position..).unwrap_or("")
    }

    /// Every match of `comparers` at parenthesis depth 0 from the cursor on.
    ///
    /// Earlier comparers win when several match at the same position, so
    /// longer keywords must be listed first.
    pub fn top_level_matches(&self, comparers: &[&WordComparer]) -> Vec<KeywordMatch> {
        let mut matches: Vec<KeywordMatch> = vec![];
        let mut depth: i32 = 0;
        let mut position = self.position;

        while position < self.length {
            if !self.code[position] {
                position += 1;
                continue;
            }

            match self.bytes[position] {
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ if depth == 0 => {
                    let found = comparers.iter().enumerate().find_map(|(index, comparer)| {
                        comparer.matches_at(self.bytes, &self.code, position).map(|length| (index, length))
                    });

                    if let Some((index, length)) = found {
                        matches.push(KeywordMatch { index, start: position, end: position + length });
                        position += length;
                        continue;
                    }
                },
                _ => {},
            }

            position += 1;
        }

        matches
    }

    pub fn find_top_level(&self, comparer: &WordComparer) -> Option<KeywordMatch> {
        self.top_level_matches(&[comparer]).into_iter().next()
    }
}
