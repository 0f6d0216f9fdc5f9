use crate::{
    parser::{scanner::code_mask, KeywordMatch, QueryParser, WordComparer, COMPARERS},
    structure::Connector,
};

/// One top-level predicate. `start`/`end` locate the trimmed expression in
/// the split text; `connector` is `None` for the first part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPart {
    pub expression: String,
    pub connector: Option<Connector>,
    pub start: usize,
    pub end: usize,
}

/// One entry of a comma separated list, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

fn trimmed_range(text: &str, start: usize, end: usize) -> (usize, usize) {
    let raw = &text[start..end];
    let leading = raw.len() - raw.trim_start().len();
    let start = start + leading;
    (start, start + raw.trim().len())
}

fn connector_comparer(connector: Connector) -> &'static WordComparer {
    match connector {
        Connector::And => &COMPARERS.and,
        Connector::Or => &COMPARERS.or,
    }
}

/// Splits a boolean expression on `connectors` found at parenthesis depth 0
/// in code spans.
///
/// The `AND` closing a `BETWEEN x AND y` at the same depth is never a split
/// point, so both bounds stay in one part.
pub fn split_top_level(expression: &str, connectors: &[Connector]) -> Vec<SplitPart> {
    let bytes = expression.as_bytes();
    let code = code_mask(expression);
    let between = &COMPARERS.between;

    let mut parts: Vec<SplitPart> = vec![];
    let mut depth: i32 = 0;
    let mut pending_between = false;
    let mut part_start = 0;
    let mut part_connector: Option<Connector> = None;
    let mut position = 0;

    'scan: while position < bytes.len() {
        if !code[position] {
            position += 1;
            continue;
        }

        match bytes[position] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ if depth == 0 => {
                if let Some(length) = between.matches_at(bytes, &code, position) {
                    pending_between = true;
                    position += length;
                    continue;
                }

                for connector in connectors {
                    let Some(length) = connector_comparer(*connector).matches_at(bytes, &code, position) else {
                        continue;
                    };

                    if *connector == Connector::And && pending_between {
                        pending_between = false;
                        position += length;
                        continue 'scan;
                    }

                    let (start, end) = trimmed_range(expression, part_start, position);
                    parts.push(SplitPart {
                        expression: expression[start..end].to_string(),
                        connector: part_connector,
                        start,
                        end,
                    });

                    pending_between = false;
                    part_connector = Some(*connector);
                    part_start = position + length;
                    position = part_start;
                    continue 'scan;
                }
            },
            _ => {},
        }

        position += 1;
    }

    let (start, end) = trimmed_range(expression, part_start, bytes.len());
    parts.push(SplitPart { expression: expression[start..end].to_string(), connector: part_connector, start, end });

    parts
}

/// Splits on commas at parenthesis depth 0 outside literals.
pub fn split_list(text: &str) -> Vec<ListItem> {
    let code = code_mask(text);
    let mut items: Vec<ListItem> = vec![];
    let mut depth: i32 = 0;
    let mut item_start = 0;

    for (position, byte) in text.bytes().enumerate() {
        if !code[position] {
            continue;
        }
        match byte {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b',' if depth == 0 => {
                let (start, end) = trimmed_range(text, item_start, position);
                items.push(ListItem { text: text[start..end].to_string(), start, end });
                item_start = position + 1;
            },
            _ => {},
        }
    }

    let (start, end) = trimmed_range(text, item_start, text.len());
    items.push(ListItem { text: text[start..end].to_string(), start, end });

    items
}

/// First `keyword` at parenthesis depth 0 in code spans.
pub fn find_top_level_keyword(text: &str, keyword: &WordComparer) -> Option<KeywordMatch> {
    QueryParser::new(text).find_top_level(keyword)
}

/// Inner byte range when the whole (trimmed) text is one parenthesized group.
pub fn enclosing_parentheses(text: &str) -> Option<(usize, usize)> {
    let (start, end) = trimmed_range(text, 0, text.len());
    let bytes = text.as_bytes();
    if end - start < 2 || bytes[start] != b'(' || bytes[end - 1] != b')' {
        return None;
    }

    let code = code_mask(text);
    let mut depth = 0;
    for position in start..end {
        if !code[position] {
            continue;
        }
        match bytes[position] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return (position == end - 1).then_some((start + 1, end - 1));
                }
            },
            _ => {},
        }
    }

    None
}
