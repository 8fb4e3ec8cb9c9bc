// src/specs/history.rs
//! Fight history from `eventsMap` (event id → event).

use serde_json::Value;

use crate::data::{FightHistoryEntry, FightResult};
use crate::derive::sort_history;
use crate::specs::fields::{bool_at, text_at};

pub const EVENTS_KEY: &str = "eventsMap";

fn entry(event: &Value) -> FightHistoryEntry {
    FightHistoryEntry {
        date: text_at(event, &["gameDate"]),
        opponent: text_at(event, &["opponent", "displayName"]),
        result: FightResult::parse(&text_at(event, &["gameResult"])),
        event: text_at(event, &["name"]),
        method: text_at(event, &["status", "result", "displayName"]),
        round: text_at(event, &["status", "period"]),
        time: text_at(event, &["status", "displayClock"]),
        title_fight: bool_at(event, &["titleFight"]).unwrap_or(false),
    }
}

/// All events under `scope.eventsMap`, most recent first.
/// Non-object entries are skipped; a missing map yields no history.
pub fn map(scope: &Value) -> Vec<FightHistoryEntry> {
    let events: Vec<&Value> = match scope.get(EVENTS_KEY) {
        Some(Value::Object(map)) => map.values().collect(),
        Some(Value::Array(items)) => items.iter().collect(),
        _ => return Vec::new(),
    };
    let mut history: Vec<FightHistoryEntry> = events
        .into_iter()
        .filter(|e| e.is_object())
        .map(entry)
        .collect();
    sort_history(&mut history);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_and_sorts_events() {
        let scope = json!({"eventsMap": {
            "600041234": {
                "gameDate": "2023-04-08T22:00Z", "gameResult": "W", "name": "UFC 287",
                "titleFight": true,
                "opponent": {"displayName": "Israel Adesanya"},
                "status": {"result": {"displayName": "KO/TKO"}, "period": 2, "displayClock": "4:21"}
            },
            "600045678": {
                "gameDate": "2023-11-11T23:00Z", "gameResult": "W", "name": "UFC 295",
                "opponent": {"displayName": "Jiri Prochazka"},
                "status": {"result": {"displayName": "KO/TKO"}, "period": 2, "displayClock": "0:20"}
            },
            "junk": 5
        }});
        let h = map(&scope);
        assert_eq!(h.len(), 2);
        assert_eq!(h[0].event, "UFC 295");
        assert!(!h[0].title_fight);
        assert_eq!(h[1].opponent, "Israel Adesanya");
        assert_eq!(h[1].round, "2");
        assert_eq!(h[1].time, "4:21");
        assert_eq!(h[1].method, "KO/TKO");
        assert!(h[1].title_fight);
        assert_eq!(h[1].result, FightResult::Win);
    }

    #[test]
    fn no_events_no_history() {
        assert!(map(&json!({"athlete": {}})).is_empty());
        assert!(map(&json!({"eventsMap": "nope"})).is_empty());
    }
}
