// src/specs/mod.rs
//! # Page shapes
//!
//! ESPN embeds the same fighter data under differently named and nested keys
//! depending on the page template. Each shape gets one module that knows
//! *where the ground truth lives* and declares its defaults as a field table:
//!
//! - `athlete`       – `athlete` root, `statsSummary.statistics[] {name, displayValue}`
//! - `player_header` – `plyrHdr.ath` root, `statsBlck.vals[] {lbl|name, val}`
//!
//! Shared by every shape:
//!
//! - `history` – `eventsMap` fight history
//! - `stats`   – `stat.tbl[]` per-bout statistic tables
//! - `fields`  – tolerant tree lookups and the field-table types
//!
//! ## Typical call chain
//! ```text
//! scrape::process_page → core::locate → core::parse → specs::map_page
//!                                                   ↘ derive::* (shape independent)
//! ```
//!
//! Absent sub-keys never fail a mapping; they take the documented default
//! (empty text, zero count). Only an unrecognisable tree is a `MappingError`.

pub mod athlete;
pub mod fields;
pub mod history;
pub mod player_header;
pub mod stats;

use serde_json::Value;

use crate::core::ParsedTree;
use crate::data::{FightHistoryEntry, FighterProfile, StatTable};
use crate::derive;
use crate::error::MappingError;

/// Known page shapes, keyed by their root node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Athlete,
    PlayerHeader,
}

impl Shape {
    pub const ALL: [Shape; 2] = [Shape::Athlete, Shape::PlayerHeader];

    pub fn root_key(self) -> &'static str {
        match self {
            Shape::Athlete => "athlete",
            Shape::PlayerHeader => "plyrHdr",
        }
    }

    fn find(v: &Value) -> Option<Shape> {
        Shape::ALL.into_iter().find(|s| v.get(s.root_key()).is_some())
    }

    /// Detect the shape and the object that holds its root node.
    /// The root is looked for at the top level, then under `page.content`.
    pub fn detect(tree: &ParsedTree) -> Result<(Shape, &Value), MappingError> {
        if let Some(shape) = Shape::find(tree) {
            return Ok((shape, tree));
        }
        if let Some(content) = tree.get("page").and_then(|p| p.get("content")) {
            if let Some(shape) = Shape::find(content) {
                return Ok((shape, content));
            }
        }
        let keys = tree
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        Err(MappingError::UnknownShape { keys })
    }
}

/// Everything one page yields.
#[derive(Clone, Debug)]
pub struct MappedPage {
    pub shape: Shape,
    pub profile: FighterProfile,
    pub stats: Vec<StatTable>,
}

fn map_shape(shape: Shape, scope: &Value, profile: &mut FighterProfile) -> Result<(), MappingError> {
    let root = &scope[shape.root_key()];
    match shape {
        Shape::Athlete => {
            if !root.is_object() {
                return Err(MappingError::MissingNode { shape: "athlete", node: "athlete" });
            }
            athlete::map(root, profile);
        }
        Shape::PlayerHeader => {
            if root.get("ath").is_none_or(|a| !a.is_object()) {
                return Err(MappingError::MissingNode { shape: "plyrHdr", node: "ath" });
            }
            player_header::map(root, scope, profile);
        }
    }
    Ok(())
}

/// Profile with history, record and win breakdown derived. No stat totals.
pub fn map_profile(tree: &ParsedTree) -> Result<FighterProfile, MappingError> {
    map_page(tree, "").map(|page| page.profile)
}

/// Fight history, most recent first. Unknown shapes simply have none.
pub fn map_fight_history(tree: &ParsedTree) -> Vec<FightHistoryEntry> {
    let scope = Shape::detect(tree).map_or(tree, |(_, scope)| scope);
    history::map(scope)
}

/// Full mapping of one page. `page_name` stands in for a missing display name.
pub fn map_page(tree: &ParsedTree, page_name: &str) -> Result<MappedPage, MappingError> {
    let (shape, scope) = Shape::detect(tree)?;
    logd!("{page_name}: {shape:?} shape");

    let mut profile = FighterProfile::default();
    map_shape(shape, scope, &mut profile)?;
    if profile.name.is_empty() {
        profile.name = s!(page_name);
    }

    derive::apply_history(&mut profile, history::map(scope));
    derive::apply_record(&mut profile);

    let stats = stats::map(scope, &profile.name);
    profile.career = stats::career_totals(&stats);

    Ok(MappedPage { shape, profile, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_nested_player_header() {
        let tree = json!({"page": {"content": {"plyrHdr": {"ath": {"dspNm": "X"}}}}});
        let (shape, scope) = Shape::detect(&tree).unwrap();
        assert_eq!(shape, Shape::PlayerHeader);
        assert!(scope.get("plyrHdr").is_some());
    }

    #[test]
    fn unknown_shape_lists_keys() {
        let err = map_profile(&json!({"foo": 1, "bar": 2})).unwrap_err();
        assert_eq!(err, MappingError::UnknownShape { keys: vec![s!("bar"), s!("foo")] });
    }

    #[test]
    fn missing_structural_node() {
        let err = map_profile(&json!({"plyrHdr": {"nope": {}}})).unwrap_err();
        assert_eq!(err, MappingError::MissingNode { shape: "plyrHdr", node: "ath" });
        let err = map_profile(&json!({"athlete": null})).unwrap_err();
        assert_eq!(err, MappingError::MissingNode { shape: "athlete", node: "athlete" });
    }

    #[test]
    fn athlete_page_end_to_end() {
        let tree = json!({
            "athlete": {
                "displayName": "Test Fighter",
                "statsSummary": {"statistics": [
                    {"name": "wins-losses-draws", "displayValue": "10-2-0"},
                    {"name": "tkos-tkoLosses", "displayValue": "4-1"},
                    {"name": "submissions-submissionLosses", "displayValue": "3-0"}
                ]}
            },
            "eventsMap": {
                "1": {"gameDate": "2024-01-01T00:00Z", "gameResult": "W", "titleFight": true,
                      "status": {"result": {"displayName": "Submission"}, "period": 1, "displayClock": "3:00"}},
                "2": {"gameDate": "2023-01-01T00:00Z", "gameResult": "L"}
            }
        });
        let page = map_page(&tree, "Page Name").unwrap();
        let p = &page.profile;
        assert_eq!(page.shape, Shape::Athlete);
        assert_eq!(p.name, "Test Fighter");
        assert_eq!(p.division_record, "10-2-0");
        assert_eq!((p.wins, p.losses, p.draws), (10, 2, 0));
        assert_eq!(p.wins_by_decision, 3);
        assert_eq!(p.fight_win_streak, 1);
        assert_eq!(p.title_defenses, 1);
        assert_eq!(p.first_round_finishes, 1);
        assert_eq!(p.history.len(), 2);
        assert!(page.stats.is_empty());
        assert!(p.career.is_none());
    }

    #[test]
    fn page_name_fills_missing_display_name() {
        let page = map_page(&json!({"athlete": {}}), "Fallback Name").unwrap();
        assert_eq!(page.profile.name, "Fallback Name");
        assert_eq!(page.profile.status, "Inactive");
    }

    #[test]
    fn history_without_shape() {
        let tree = json!({"eventsMap": {"1": {"gameResult": "W"}}});
        assert_eq!(map_fight_history(&tree).len(), 1);
    }

    #[test]
    fn huge_round_number_does_not_abort_mapping() {
        let tree = json!({
            "athlete": {"displayName": "X"},
            "eventsMap": {"1": {"gameResult": "W",
                "status": {"period": 20000000, "displayClock": "1:00"}}}
        });
        let page = map_page(&tree, "X").unwrap();
        assert_eq!(page.profile.history.len(), 1);
        assert_eq!(page.profile.average_fight_time, "");
        assert_eq!(page.profile.fight_win_streak, 1);
    }
}
