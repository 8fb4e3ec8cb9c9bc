// src/core/locate.rs
//! Finds the object value of a named key inside arbitrary page text.

use crate::error::ExtractError;

/// Byte range of a balanced `{ ... }` object, `end` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Locate the object that is the value of `"key"` in `text`.
///
/// The first occurrence of `"key"` followed by `:` and `{` wins; occurrences
/// with a non-object value are passed over. Braces inside string literals
/// do not count toward nesting.
pub fn locate(text: &str, key: &str) -> Result<Span, ExtractError> {
    let needle = format!("\"{key}\"");
    let bytes = text.as_bytes();
    let mut from = 0;

    while let Some(pos) = text[from..].find(&needle) {
        let after_key = from + pos + needle.len();
        from = after_key;

        let Some(open) = object_start(bytes, after_key) else { continue };
        return match balanced_end(bytes, open) {
            Ok(end) => Ok(Span { start: open, end }),
            Err(depth) => Err(ExtractError::UnbalancedSpan { key: s!(key), start: open, depth }),
        };
    }

    Err(ExtractError::NotFound { key: s!(key) })
}

/// Convenience: the located object as a string slice.
pub fn locate_str<'a>(text: &'a str, key: &str) -> Result<&'a str, ExtractError> {
    locate(text, key).map(|span| span.slice(text))
}

/// After a quoted key: optional whitespace, `:`, optional whitespace, `{`.
fn object_start(bytes: &[u8], mut i: usize) -> Option<usize> {
    i = skip_ws(bytes, i);
    if bytes.get(i) != Some(&b':') { return None; }
    i = skip_ws(bytes, i + 1);
    (bytes.get(i) == Some(&b'{')).then_some(i)
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) { i += 1; }
    i
}

/// Scan from the opening brace to its partner. Returns the exclusive end,
/// or the depth still open when the text runs out.
fn balanced_end(bytes: &[u8], open: usize) -> Result<usize, usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped { escaped = false; }
            else if b == b'\\' { escaped = true; }
            else if b == b'"' { in_string = false; }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 { return Ok(i + 1); }
            }
            _ => {}
        }
    }
    Err(depth)
}
