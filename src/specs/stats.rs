// src/specs/stats.rs
//! Per-bout statistic tables under `stat.tbl[]`.
//!
//! ```text
//! stat: { tbl: [ { ttl: "Striking", col: [ {ttl: "Date"}, … ], row: [ [cell, …], … ] }, … ] }
//! ```
//! Cells are scalars or small objects (`{dte}`, `{txt}`, `{rslt}`).
//! Output rows always use the fixed `StatCategory` layout.

use serde_json::Value;

use crate::core::sanitize::leading_int;
use crate::data::{CareerTotals, StatCategory, StatTable};
use crate::specs::fields::{array_at, text, text_at};

/// Object keys that carry a cell's display text, in order of preference.
const CELL_KEYS: [&str; 5] = ["dte", "txt", "rslt", "val", "dspVal"];

/// Site column titles that differ from the stored column names.
const SYNONYMS: &[(&str, &str)] = &[
    ("Opp", "Opponent"),
    ("Res", "Result"),
    ("Significant Strikes Landed", "SSL"),
    ("Significant Strikes Attempts", "SSA"),
    ("Significant Strikes Attempted", "SSA"),
    ("Total Strikes Landed", "TSL"),
    ("Total Strikes Attempts", "TSA"),
    ("Total Strikes Attempted", "TSA"),
    ("Knockdowns", "KD"),
    ("Takedowns Landed", "TDL"),
    ("Takedowns Attempted", "TDA"),
    ("Takedowns Slams", "TDS"),
    ("Takedown Accuracy", "TK ACC"),
];

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Object(map) => CELL_KEYS
            .iter()
            .find_map(|k| map.get(*k))
            .or_else(|| map.values().find(|v| v.is_string()))
            .map(text)
            .unwrap_or_default(),
        other => text(other),
    }
}

fn column_title(col: &Value) -> String {
    match col {
        Value::Object(_) => text_at(col, &["ttl"]),
        other => text(other),
    }
}

/// Index into `category.columns()` for a site column title.
fn resolve(category: StatCategory, title: &str) -> Option<usize> {
    let t = title.trim();
    let name = SYNONYMS
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(t))
        .map_or(t, |(_, to)| *to);
    category.columns().iter().position(|c| c.eq_ignore_ascii_case(name))
}

/// Source column index → target column index. Positional when no title matches.
fn layout(category: StatCategory, cols: &[Value]) -> Vec<Option<usize>> {
    let by_title: Vec<Option<usize>> = cols
        .iter()
        .map(|c| resolve(category, &column_title(c)))
        .collect();
    if by_title.iter().any(Option::is_some) {
        return by_title;
    }
    (0..category.columns().len()).map(Some).collect()
}

fn map_table(category: StatCategory, table: &Value, player: &str) -> StatTable {
    let layout = layout(category, array_at(table, &["col"]));
    let width = category.columns().len();

    let rows = array_at(table, &["row"])
        .iter()
        .filter_map(|row| {
            let cells = row.as_array()?;
            let mut out = vec![s!(); width + 1];
            out[0] = s!(player);
            for (src, cell) in cells.iter().enumerate() {
                if let Some(Some(dst)) = layout.get(src) {
                    out[dst + 1] = cell_text(cell);
                }
            }
            out[1..].iter().any(|c| !c.is_empty()).then_some(out)
        })
        .collect();

    StatTable { category, rows }
}

/// Every recognised table under `scope.stat.tbl`, rows prefixed with `player`.
/// Tables with an unknown title are skipped.
pub fn map(scope: &Value, player: &str) -> Vec<StatTable> {
    let mut out: Vec<StatTable> = Vec::new();
    for table in array_at(scope, &["stat", "tbl"]) {
        let title = text_at(table, &["ttl"]);
        let Some(category) = StatCategory::from_title(&title) else {
            logd!("{player}: skipping stat table '{title}'");
            continue;
        };
        let mapped = map_table(category, table, player);
        match out.iter_mut().find(|t| t.category == category) {
            Some(existing) => existing.rows.extend(mapped.rows),
            None => out.push(mapped),
        }
    }
    out
}

/// Sums over all bouts. `None` when there are no tables at all.
pub fn career_totals(tables: &[StatTable]) -> Option<CareerTotals> {
    if tables.is_empty() { return None; }

    let mut totals = CareerTotals::default();
    for table in tables {
        let col = |name: &str| {
            table.category.columns().iter().position(|c| *c == name).map(|i| i + 1)
        };
        let sum = |name: &str| -> u32 {
            col(name).map_or(0, |i| {
                table.rows.iter().fold(0u32, |acc, r| acc.saturating_add(leading_int(&r[i]).unwrap_or(0)))
            })
        };
        match table.category {
            StatCategory::Striking => {
                totals.sig_strikes_landed = totals.sig_strikes_landed.saturating_add(sum("SSL"));
                totals.sig_strikes_attempted = totals.sig_strikes_attempted.saturating_add(sum("SSA"));
                totals.knockdowns = totals.knockdowns.saturating_add(sum("KD"));
            }
            StatCategory::Clinch => {
                totals.takedowns_landed = totals.takedowns_landed.saturating_add(sum("TDL"));
                totals.takedowns_attempted = totals.takedowns_attempted.saturating_add(sum("TDA"));
            }
            StatCategory::Ground => {}
        }
    }
    Some(totals)
}
