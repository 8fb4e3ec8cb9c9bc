// src/specs/athlete.rs
//! `athlete`-rooted pages.
//!
//! ```text
//! athlete: { displayName, weightClass: {text}, citizenshipCountry: {abbreviation},
//!            stance: {text}, age, displayHeight, displayWeight, displayReach,
//!            team: {name}, active,
//!            statsSummary: { statistics: [ {name, displayValue}, … ] } }
//! ```

use serde_json::Value;

use crate::data::FighterProfile;
use crate::derive::first_count;
use crate::specs::fields::{
    apply_stat_fields, apply_text_fields, array_at, bool_at, text_at, StatField, TextField,
};

/// Copied text fields. Absent → empty.
pub const FIELDS: &[TextField] = &[
    TextField { path: &["displayName"], column: "Name", set: |p, v| p.name = v },
    TextField { path: &["weightClass", "text"], column: "Division_Title", set: |p, v| p.division_title = v },
    TextField { path: &["citizenshipCountry", "abbreviation"], column: "Country", set: |p, v| p.country = v },
    TextField { path: &["stance", "text"], column: "Fighting_Style", set: |p, v| p.fighting_style = v },
    TextField { path: &["age"], column: "Age", set: |p, v| p.age = v },
    TextField { path: &["displayHeight"], column: "Height", set: |p, v| p.height = v },
    TextField { path: &["displayWeight"], column: "Weight", set: |p, v| p.weight = v },
    TextField { path: &["displayReach"], column: "Reach", set: |p, v| p.reach = v },
    TextField { path: &["team", "name"], column: "Trains_at", set: |p, v| p.trains_at = v },
];

/// `statsSummary.statistics[].name`. Absent → record empty, counts 0.
pub const STATS: &[StatField] = &[
    StatField { names: &["wins-losses-draws"], apply: |p, v| p.division_record = s!(v.trim()) },
    StatField { names: &["tkos-tkoLosses"], apply: |p, v| p.wins_by_knockout = first_count(v) },
    StatField { names: &["submissions-submissionLosses"], apply: |p, v| p.wins_by_submission = first_count(v) },
];

/// Fill `profile` from the `athlete` node.
pub fn map(athlete: &Value, profile: &mut FighterProfile) {
    apply_text_fields(profile, athlete, FIELDS);

    // `active` absent → Inactive
    profile.status = match bool_at(athlete, &["active"]) {
        Some(true) => s!("Active"),
        _ => s!("Inactive"),
    };

    let pairs = array_at(athlete, &["statsSummary", "statistics"])
        .iter()
        .map(|stat| (text_at(stat, &["name"]), text_at(stat, &["displayValue"])));
    let matched = apply_stat_fields(profile, pairs, STATS);
    logd!("athlete stats for {}: {:?}", profile.name, matched);
}
