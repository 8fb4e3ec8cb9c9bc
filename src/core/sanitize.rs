// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Fighter name → file stem: `Jon Jones` → `Jon_Jones`.
/// Path separators become underscores too, so a name can never escape the page folder.
pub fn safe_file_stem(name: &str) -> String {
    normalize_ws(name)
        .chars()
        .map(|ch| match ch {
            ' ' | '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect()
}

/// Inverse of `safe_file_stem` for stems found on disk.
pub fn stem_to_name(stem: &str) -> String {
    normalize_ws(&stem.replace('_', " "))
}

/// Leading run of digits after optional whitespace: `"34 yrs"` → Some(34).
pub fn leading_int(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Text between the first `(` and the following `)`: `"9/1/1987 (37)"` → `"37"`.
pub fn parenthesized(s: &str) -> Option<&str> {
    let open = s.find('(')?;
    let close = s[open + 1..].find(')')? + open + 1;
    Some(s[open + 1..close].trim())
}
