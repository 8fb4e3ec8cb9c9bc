// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant). Blank lines are dropped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.strip_prefix('\u{feff}').unwrap_or(text).chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next(); // doubled quote
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                push_row(&mut rows, take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without newline, even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }
    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
}

/// First row is the header row.
pub fn split_headers(mut rows: Vec<Vec<String>>) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    if rows.is_empty() { return (None, rows); }
    let headers = rows.remove(0);
    (Some(headers), rows)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 { write!(w, "{sep}")?; }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

pub fn write_table<W: Write>(
    mut w: W,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    sep: char,
) -> io::Result<()> {
    if let Some(h) = headers {
        write_row(&mut w, h, sep)?;
    }
    for r in rows {
        write_row(&mut w, r, sep)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_survive() {
        let rows = vec![
            row!["Name", "Height", "Note"],
            row!["Jon Jones", "6' 4\"", "a,b"],
            row!["Multi", "x", "line\nbreak"],
        ];
        let mut buf: Vec<u8> = Vec::new();
        write_table(&mut buf, Some(&rows[0]), &rows[1..], ',').unwrap();
        assert_eq!(parse_rows(&String::from_utf8(buf).unwrap(), ','), rows);
    }

    #[test]
    fn crlf_blank_lines_and_bom() {
        let rows = parse_rows("\u{feff}A,B\r\n\r\n1,2\r\n,\n3,", ',');
        assert_eq!(rows, vec![row!["A", "B"], row!["1", "2"], row!["", ""], row!["3", ""]]);
    }

    #[test]
    fn headers_split() {
        let (h, r) = split_headers(parse_rows("Name\nA\nB\n", ','));
        assert_eq!(h, Some(row!["Name"]));
        assert_eq!(r.len(), 2);
        assert_eq!(split_headers(Vec::new()), (None, Vec::new()));
    }
}
