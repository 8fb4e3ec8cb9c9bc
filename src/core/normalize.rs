// src/core/normalize.rs
//! Repairs the two non-conformances ESPN script objects actually carry:
//! `//` line comments and trailing commas before `}` or `]`.
//! String literals pass through untouched.

/// Return `text` with line comments removed and trailing commas dropped.
/// The newline ending a comment is kept so line numbers stay stable.
pub fn normalize(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            out.push(b);
            if escaped { escaped = false; }
            else if b == b'\\' { escaped = true; }
            else if b == b'"' { in_string = false; }
            i += 1;
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                out.push(b);
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = line_end(bytes, i);
            }
            b',' if closes_next(bytes, i + 1) => {
                i += 1;
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    // Only ASCII bytes were dropped, so the rest is still valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Index of the newline ending the comment at `i` (or end of text).
fn line_end(bytes: &[u8], i: usize) -> usize {
    bytes[i..].iter().position(|&b| b == b'\n').map_or(bytes.len(), |p| i + p)
}

/// True when the next significant byte after `i` closes an object or array.
/// Whitespace and line comments in between are skipped.
fn closes_next(bytes: &[u8], mut i: usize) -> bool {
    loop {
        match bytes.get(i) {
            Some(b) if b.is_ascii_whitespace() => i += 1,
            Some(b'/') if bytes.get(i + 1) == Some(&b'/') => i = line_end(bytes, i),
            Some(b'}') | Some(b']') => return true,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_comments() {
        let text = "{\"a\":1, // first\n\"b\":2}// tail";
        assert_eq!(normalize(text), "{\"a\":1, \n\"b\":2}");
    }

    #[test]
    fn drops_trailing_commas() {
        assert_eq!(normalize(r#"{"a":[1,2,],"b":{"c":3,}}"#), r#"{"a":[1,2],"b":{"c":3}}"#);
        assert_eq!(normalize("{\"a\":1,\n  }"), "{\"a\":1\n  }");
    }

    #[test]
    fn trailing_comma_behind_comment() {
        assert_eq!(normalize("[1, // last\n]"), "[1 \n]");
    }

    #[test]
    fn string_literals_untouched() {
        let text = r#"{"url":"http://espn.com/x","odd":",}","also":",]","esc":"a\"//b",}"#;
        assert_eq!(
            normalize(text),
            r#"{"url":"http://espn.com/x","odd":",}","also":",]","esc":"a\"//b"}"#
        );
    }

    #[test]
    fn plain_json_is_unchanged() {
        let text = r#"{"name":"Jon Jones","nums":[1,2,3],"nested":{"x":"é"}}"#;
        assert_eq!(normalize(text), text);
    }
}
