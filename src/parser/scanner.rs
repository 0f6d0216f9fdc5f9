/// Lexical class of a span of SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Code,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment,
}

impl SpanKind {
    pub fn is_code(&self) -> bool {
        matches!(self, SpanKind::Code)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, SpanKind::SingleQuoted | SpanKind::DoubleQuoted)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, SpanKind::LineComment | SpanKind::BlockComment)
    }
}

/// Byte range `[start, end)` of the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
    /// False for a literal or block comment running into end of input.
    pub terminated: bool,
}

impl Span {
    pub fn text<'a>(&self, sql: &'a str) -> &'a str {
        &sql[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Single pass scanner splitting SQL into code, literal and comment spans.
///
/// Spans are contiguous and cover the whole input. Scanning never fails:
/// unterminated literals and block comments extend to the end of input.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self { bytes: sql.as_bytes(), position: 0 }
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.position + ahead).copied()
    }

    fn starts_special(&self, position: usize) -> bool {
        match self.bytes[position] {
            b'\'' | b'"' => true,
            b'-' => self.bytes.get(position + 1) == Some(&b'-'),
            b'/' => self.bytes.get(position + 1) == Some(&b'*'),
            _ => false,
        }
    }

    fn scan_code(&mut self) -> Span {
        let start = self.position;
        self.position += 1;
        while self.position < self.bytes.len() && !self.starts_special(self.position) {
            self.position += 1;
        }
        Span { start, end: self.position, kind: SpanKind::Code, terminated: true }
    }

    fn scan_quoted(&mut self, quote: u8, kind: SpanKind) -> Span {
        let start = self.position;
        self.position += 1;
        while self.position < self.bytes.len() {
            if self.bytes[self.position] == quote {
                if self.peek(1) == Some(quote) {
                    self.position += 2;
                    continue;
                }
                self.position += 1;
                return Span { start, end: self.position, kind, terminated: true };
            }
            self.position += 1;
        }
        Span { start, end: self.position, kind, terminated: false }
    }

    fn scan_line_comment(&mut self) -> Span {
        let start = self.position;
        self.position += 2;
        while self.position < self.bytes.len() && self.bytes[self.position] != b'\n' {
            self.position += 1;
        }
        Span { start, end: self.position, kind: SpanKind::LineComment, terminated: true }
    }

    fn scan_block_comment(&mut self) -> Span {
        let start = self.position;
        self.position += 2;
        while self.position < self.bytes.len() {
            if self.bytes[self.position] == b'*' && self.peek(1) == Some(b'/') {
                self.position += 2;
                return Span { start, end: self.position, kind: SpanKind::BlockComment, terminated: true };
            }
            self.position += 1;
        }
        Span { start, end: self.position, kind: SpanKind::BlockComment, terminated: false }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.bytes.len() {
            return None;
        }

        let span = match self.bytes[self.position] {
            b'\'' => self.scan_quoted(b'\'', SpanKind::SingleQuoted),
            b'"' => self.scan_quoted(b'"', SpanKind::DoubleQuoted),
            b'-' if self.peek(1) == Some(b'-') => self.scan_line_comment(),
            b'/' if self.peek(1) == Some(b'*') => self.scan_block_comment(),
            _ => self.scan_code(),
        };

        Some(span)
    }
}

pub fn scan(sql: &str) -> Vec<Span> {
    Scanner::new(sql).collect()
}

/// One flag per byte of `sql`, true where the byte belongs to a code span.
pub fn code_mask(sql: &str) -> Vec<bool> {
    let mut mask = vec![false; sql.len()];
    for span in Scanner::new(sql).filter(|span| span.kind.is_code()) {
        mask[span.start..span.end].fill(true);
    }
    mask
}

/// Replaces every comment by spaces, keeping byte offsets stable.
pub fn mask_comments(sql: &str) -> String {
    let mut masked = String::with_capacity(sql.len());
    for span in Scanner::new(sql) {
        if span.kind.is_comment() {
            masked.extend(std::iter::repeat_n(' ', span.len()));
        } else {
            masked.push_str(span.text(sql));
        }
    }
    masked
}

/// Content of a quoted literal with doubled quotes collapsed.
pub fn unquote(literal: &str) -> String {
    let Some(quote) = literal.chars().next().filter(|ch| *ch == '\'' || *ch == '"') else {
        return literal.to_string();
    };
    let inner = literal.strip_prefix(quote).unwrap_or(literal);
    let inner = inner.strip_suffix(quote).unwrap_or(inner);
    let doubled: String = [quote, quote].iter().collect();
    inner.replace(&doubled, &quote.to_string())
}

#[cfg(test)]
mod tests {
    use crate::parser::scanner::*;

    fn kinds(sql: &str) -> Vec<(SpanKind, &str)> {
        Scanner::new(sql).map(|span| (span.kind, span.text(sql))).collect()
    }

    #[test]
    pub fn test_scanner_spans_cover_input() {
        let sql = "SELECT ':x' FROM t -- :y\n WHERE c = :z /* note */";

        let spans = scan(sql);

        assert_eq!(spans.first().map(|span| span.start), Some(0));
        assert_eq!(spans.last().map(|span| span.end), Some(sql.len()));
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    pub fn test_scanner_kinds() {
        let sql = "a = 'x' -- c\nb \"q\" /* d */";

        assert_eq!(
            kinds(sql),
            vec![
                (SpanKind::Code, "a = "),
                (SpanKind::SingleQuoted, "'x'"),
                (SpanKind::Code, " "),
                (SpanKind::LineComment, "-- c"),
                (SpanKind::Code, "\nb "),
                (SpanKind::DoubleQuoted, "\"q\""),
                (SpanKind::Code, " "),
                (SpanKind::BlockComment, "/* d */"),
            ]
        );
    }

    #[test]
    pub fn test_scanner_escaped_quote() {
        let sql = "'it''s' x";

        let spans = scan(sql);

        assert_eq!(spans[0].text(sql), "'it''s'");
        assert!(spans[0].terminated);
        assert_eq!(spans[1].kind, SpanKind::Code);
    }

    #[test]
    pub fn test_scanner_unterminated() {
        let sql = "a = 'open :p";
        let spans = scan(sql);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].kind, SpanKind::SingleQuoted);
        assert!(!spans[1].terminated);
        assert_eq!(spans[1].end, sql.len());

        let sql = "a /* never closed";
        let spans = scan(sql);
        assert_eq!(spans[1].kind, SpanKind::BlockComment);
        assert!(!spans[1].terminated);
    }

    #[test]
    pub fn test_scanner_lone_dash_and_slash_are_code() {
        let sql = "a - b / c";

        assert_eq!(kinds(sql), vec![(SpanKind::Code, sql)]);
    }

    #[test]
    pub fn test_code_mask() {
        let mask = code_mask("a'b'c");

        assert_eq!(mask, vec![true, false, false, false, true]);
    }

    #[test]
    pub fn test_mask_comments_keeps_offsets() {
        let sql = "SELECT a -- é\nFROM t /* x */";

        let masked = mask_comments(sql);

        assert_eq!(masked.len(), sql.len());
        assert!(!masked.contains("--"));
        assert!(!masked.contains("/*"));
        assert_eq!(masked.find("FROM"), sql.find("FROM"));
    }

    #[test]
    pub fn test_unquote() {
        assert_eq!(unquote("'it''s'"), "it's");
        assert_eq!(unquote("\"Matosinhos\""), "Matosinhos");
        assert_eq!(unquote("plain"), "plain");
    }
}
