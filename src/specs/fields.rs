// src/specs/fields.rs
//! Tolerant lookups over a parsed tree plus the field-table types the
//! shape modules use to declare their defaults.

use serde_json::Value;

use crate::data::FighterProfile;

/// Walk `path` from `v`. A scalar met before the path ends is returned
/// as-is, so `weightClass.text` still finds `"weightClass": "Lightweight"`.
pub fn node<'a>(v: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = v;
    for key in path {
        match cur {
            Value::Object(map) => cur = map.get(*key)?,
            Value::Null => return None,
            Value::String(_) | Value::Number(_) | Value::Bool(_) => return Some(cur),
            Value::Array(_) => return None,
        }
    }
    Some(cur)
}

/// Display text of a scalar; containers and null read as empty.
pub fn text(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => s!(),
    }
}

/// Text at `path`, empty when absent.
pub fn text_at(v: &Value, path: &[&str]) -> String {
    node(v, path).map(text).unwrap_or_default()
}

pub fn bool_at(v: &Value, path: &[&str]) -> Option<bool> {
    match node(v, path)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

/// Elements of the array at `path`; empty when absent or not an array.
pub fn array_at<'a>(v: &'a Value, path: &[&str]) -> &'a [Value] {
    match node(v, path) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// A text field copied straight from the tree. Absent → empty string.
pub struct TextField {
    pub path: &'static [&'static str],
    pub column: &'static str,
    pub set: fn(&mut FighterProfile, String),
}

/// A `{name, value}` statistic recognised under any of `names`.
pub struct StatField {
    pub names: &'static [&'static str],
    pub apply: fn(&mut FighterProfile, &str),
}

/// Apply a field table to `profile`.
pub fn apply_text_fields(profile: &mut FighterProfile, root: &Value, fields: &[TextField]) {
    for f in fields {
        (f.set)(profile, text_at(root, f.path));
    }
}

/// Apply the first matching `StatField` for each `(label, value)` pair.
/// Label comparison ignores ASCII case.
pub fn apply_stat_fields<'a>(
    profile: &mut FighterProfile,
    pairs: impl IntoIterator<Item = (String, String)>,
    fields: &'a [StatField],
) -> Vec<&'a str> {
    let mut matched = Vec::new();
    for (label, value) in pairs {
        let hit = fields
            .iter()
            .find(|f| f.names.iter().any(|n| n.eq_ignore_ascii_case(label.trim())));
        if let Some(f) = hit {
            (f.apply)(profile, &value);
            matched.push(f.names[0]);
        }
    }
    matched
}
