// src/derive.rs
//! Aggregates computed from the record string and the fight history.
//! Every routine here works the same whatever page shape the data came from.

use chrono::NaiveDate;

use crate::config::consts::ROUND_SECS;
use crate::core::sanitize::leading_int;
use crate::data::{FightHistoryEntry, FighterProfile};

/// `W-L-D` as counts. Missing parts are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Record {
    pub fn parse(s: &str) -> Self {
        let mut parts = s.split('-').map(|p| leading_int(p).unwrap_or(0));
        Self {
            wins: parts.next().unwrap_or(0),
            losses: parts.next().unwrap_or(0),
            draws: parts.next().unwrap_or(0),
        }
    }
}

/// First number of a `"won-lost"` pair such as the `(T)KO` stat `"6-1"`.
pub fn first_count(s: &str) -> u32 {
    s.split('-').next().and_then(leading_int).unwrap_or(0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinBreakdown {
    pub knockout: u32,
    pub submission: u32,
    pub decision: u32,
}

impl WinBreakdown {
    /// Decision wins are whatever is left after finishes, clamped at zero.
    pub fn derive(name: &str, wins: u32, knockout: u32, submission: u32) -> Self {
        let finishes = knockout.saturating_add(submission);
        if finishes > wins {
            logw!("{name}: {knockout} KO + {submission} SUB wins exceed {wins} total wins; decision wins set to 0");
        }
        Self { knockout, submission, decision: wins.saturating_sub(finishes) }
    }
}

fn date_key(date: &str) -> Option<NaiveDate> {
    let d = date.trim();
    d.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(d, "%m/%d/%Y").ok())
        .or_else(|| NaiveDate::parse_from_str(d, "%b %d, %Y").ok())
}

/// Most recent first. Undated entries sink to the end; ties keep their order.
pub fn sort_history(history: &mut [FightHistoryEntry]) {
    history.sort_by(|a, b| date_key(&b.date).cmp(&date_key(&a.date)));
}

/// Leading run of wins. Any other result ends it.
pub fn win_streak(history: &[FightHistoryEntry]) -> u32 {
    history.iter().take_while(|f| f.result.is_win()).count() as u32
}

/// Title-fight wins inside the current win streak.
pub fn title_defenses(history: &[FightHistoryEntry]) -> u32 {
    history
        .iter()
        .take_while(|f| f.result.is_win())
        .filter(|f| f.title_fight)
        .count() as u32
}

fn is_decision(method: &str) -> bool {
    let m = method.trim().to_ascii_lowercase();
    m.starts_with("dec") || m.contains("decision")
}

pub fn first_round_finishes(history: &[FightHistoryEntry]) -> u32 {
    history
        .iter()
        .filter(|f| f.result.is_win())
        .filter(|f| leading_int(&f.round) == Some(1))
        .filter(|f| !f.method.trim().is_empty() && !is_decision(&f.method))
        .count() as u32
}

/// `"4:32"` → 272.
fn clock_secs(time: &str) -> Option<u32> {
    let (m, s) = time.trim().split_once(':')?;
    let m: u32 = m.trim().parse().ok()?;
    let s: u32 = s.trim().parse().ok()?;
    if s >= 60 { return None; }
    m.checked_mul(60)?.checked_add(s)
}

/// `None` for a missing round or clock, and for values that do not fit.
fn elapsed_secs(f: &FightHistoryEntry) -> Option<u32> {
    let round = leading_int(&f.round).filter(|r| *r >= 1)?;
    (round - 1).checked_mul(ROUND_SECS)?.checked_add(clock_secs(&f.time)?)
}

/// Mean elapsed fight time as `m:ss`; empty when no fight has round and clock.
pub fn average_fight_time(history: &[FightHistoryEntry]) -> String {
    let times: Vec<u64> = history.iter().filter_map(elapsed_secs).map(u64::from).collect();
    if times.is_empty() { return s!(); }
    let total: u64 = times.iter().sum();
    let avg = (total as f64 / times.len() as f64).round() as u64;
    format!("{}:{:02}", avg / 60, avg % 60)
}

/// Exactly `n` slots; slots past the end of the history are `None`.
pub fn recent_fights(history: &[FightHistoryEntry], n: usize) -> Vec<Option<&FightHistoryEntry>> {
    (0..n).map(|i| history.get(i)).collect()
}

/// Sort `history` into the profile and fill every history-derived field.
pub fn apply_history(profile: &mut FighterProfile, mut history: Vec<FightHistoryEntry>) {
    sort_history(&mut history);
    profile.fight_win_streak = win_streak(&history);
    profile.title_defenses = title_defenses(&history);
    profile.former_champion = profile.title_defenses > 0;
    profile.first_round_finishes = first_round_finishes(&history);
    profile.average_fight_time = average_fight_time(&history);
    profile.history = history;
}

/// Fill record components and the win breakdown from the record string
/// and the per-method counters already on the profile.
pub fn apply_record(profile: &mut FighterProfile) {
    let rec = Record::parse(&profile.division_record);
    profile.wins = rec.wins;
    profile.losses = rec.losses;
    profile.draws = rec.draws;
    let wb = WinBreakdown::derive(&profile.name, rec.wins, profile.wins_by_knockout, profile.wins_by_submission);
    profile.wins_by_decision = wb.decision;
}
