// src/specs/player_header.rs
//! `plyrHdr`-rooted pages (abbreviated keys).
//!
//! ```text
//! plyrHdr:   { ath: { dspNm, wghtclss, cntry, stnc, dob, htwt, rch, tm } }
//! statsBlck: { vals: [ {lbl | name, val}, … ] }   (inside plyrHdr or next to it)
//! ```

use serde_json::Value;

use crate::core::sanitize::parenthesized;
use crate::data::FighterProfile;
use crate::derive::first_count;
use crate::specs::fields::{
    apply_stat_fields, apply_text_fields, array_at, node, text_at, StatField, TextField,
};

/// Copied text fields under `ath`. Absent → empty.
pub const FIELDS: &[TextField] = &[
    TextField { path: &["dspNm"], column: "Name", set: |p, v| p.name = v },
    TextField { path: &["wghtclss"], column: "Division_Title", set: |p, v| p.division_title = v },
    TextField { path: &["cntry"], column: "Country", set: |p, v| p.country = v },
    TextField { path: &["stnc"], column: "Fighting_Style", set: |p, v| p.fighting_style = v },
    TextField { path: &["rch"], column: "Reach", set: |p, v| p.reach = v },
    TextField { path: &["tm"], column: "Trains_at", set: |p, v| p.trains_at = v },
];

/// `statsBlck.vals[]` labels; short and long forms both occur.
pub const STATS: &[StatField] = &[
    StatField { names: &["W-L-D", "Wins-Losses-Draws"], apply: |p, v| p.division_record = s!(v.trim()) },
    StatField {
        names: &["(T)KO", "Technical Knockout-Technical Knockout Losses"],
        apply: |p, v| p.wins_by_knockout = first_count(v),
    },
    StatField {
        names: &["SUB", "Submissions-Submission Losses"],
        apply: |p, v| p.wins_by_submission = first_count(v),
    },
];

/// `"6' 0\", 185 lbs"` → (`6' 0"`, `185 lbs`).
fn split_height_weight(htwt: &str) -> (String, String) {
    match htwt.split_once(',') {
        Some((h, w)) => (s!(h.trim()), s!(w.trim())),
        None => (s!(htwt.trim()), s!()),
    }
}

/// Fill `profile` from the `plyrHdr` node. `scope` is the object holding it,
/// searched for `statsBlck` when the header itself has none.
pub fn map(header: &Value, scope: &Value, profile: &mut FighterProfile) {
    let ath = node(header, &["ath"]).unwrap_or(header);
    apply_text_fields(profile, ath, FIELDS);

    profile.age = parenthesized(&text_at(ath, &["dob"])).map(String::from).unwrap_or_default();
    (profile.height, profile.weight) = split_height_weight(&text_at(ath, &["htwt"]));
    profile.status = s!("Active");

    let vals = match array_at(header, &["statsBlck", "vals"]) {
        [] => array_at(scope, &["statsBlck", "vals"]),
        found => found,
    };
    let pairs = vals.iter().map(|stat| {
        let label = match text_at(stat, &["lbl"]) {
            l if l.is_empty() => text_at(stat, &["name"]),
            l => l,
        };
        (label, text_at(stat, &["val"]))
    });
    let matched = apply_stat_fields(profile, pairs, STATS);
    logd!("plyrHdr stats for {}: {:?}", profile.name, matched);
}
