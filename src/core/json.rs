// src/core/json.rs
use serde_json::Value;

use crate::core::normalize::normalize;
use crate::error::ParseError;

/// Generic tree of maps, sequences and scalars.
pub type ParsedTree = Value;

const SNIPPET_RADIUS: usize = 40;

/// Normalize then parse a located object.
pub fn parse(span_text: &str) -> Result<ParsedTree, ParseError> {
    let text = normalize(span_text);
    serde_json::from_str(&text).map_err(|e| {
        let offset = byte_offset(&text, e.line(), e.column());
        ParseError {
            offset,
            line: e.line(),
            column: e.column(),
            snippet: snippet(&text, offset),
            message: e.to_string(),
        }
    })
}

/// serde_json reports 1-based line and column; column counts bytes.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

fn snippet(text: &str, offset: usize) -> String {
    let mut lo = offset.saturating_sub(SNIPPET_RADIUS);
    let mut hi = (offset + SNIPPET_RADIUS).min(text.len());
    while !text.is_char_boundary(lo) { lo -= 1; }
    while !text.is_char_boundary(hi) { hi += 1; }
    text[lo..hi].replace(['\n', '\r'], " ")
}
