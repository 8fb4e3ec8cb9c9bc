// src/data.rs
//
// Data model produced by one mapping pass.
//
// - RawPage:           page text + the fighter name it was fetched under.
// - FighterProfile:    flat profile record with a fixed column layout.
// - FightHistoryEntry: one bout, most-recent-first inside a profile.
// - StatTable:         per-bout statistic rows for one category.
//
// Everything here is transient; only `store::DataSet` outlives a run.

use crate::config::TableKind;

/// Page text plus its logical identity.
#[derive(Clone, Debug)]
pub struct RawPage {
    pub name: String,
    pub text: String,
}

impl RawPage {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

/* ---------------- Fight history ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FightResult {
    Win,
    Loss,
    Draw,
    /// No contest, pending, or whatever else ESPN sends.
    Other(String),
}

impl FightResult {
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        match t.to_ascii_lowercase().as_str() {
            "w" | "win" => FightResult::Win,
            "l" | "loss" => FightResult::Loss,
            "d" | "draw" => FightResult::Draw,
            _ => FightResult::Other(s!(t)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FightResult::Win => "W",
            FightResult::Loss => "L",
            FightResult::Draw => "D",
            FightResult::Other(s) => s,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, FightResult::Win)
    }
}

/// One bout. Text fields are empty when ESPN leaves them out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FightHistoryEntry {
    pub date: String,
    pub opponent: String,
    pub result: FightResult,
    pub event: String,
    pub method: String,
    pub round: String,
    pub time: String,
    pub title_fight: bool,
}

impl FightHistoryEntry {
    /// Positional columns for one `Event_N_*` slot.
    pub const SLOT_FIELDS: [&'static str; 7] =
        ["Headline", "Date", "Opponent", "Result", "Round", "Time", "Method"];

    fn slot_cells(&self) -> [String; 7] {
        [
            self.event.clone(),
            self.date.clone(),
            self.opponent.clone(),
            s!(self.result.as_str()),
            self.round.clone(),
            self.time.clone(),
            self.method.clone(),
        ]
    }
}

/* ---------------- Profile ---------------- */

/// Sums over the fight-statistic tables of one page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CareerTotals {
    pub sig_strikes_landed: u32,
    pub sig_strikes_attempted: u32,
    pub takedowns_landed: u32,
    pub takedowns_attempted: u32,
    pub knockdowns: u32,
}

impl CareerTotals {
    pub fn striking_accuracy(&self) -> String {
        percent(self.sig_strikes_landed, self.sig_strikes_attempted)
    }

    pub fn takedown_accuracy(&self) -> String {
        percent(self.takedowns_landed, self.takedowns_attempted)
    }
}

fn percent(landed: u32, attempted: u32) -> String {
    if attempted == 0 { return s!(); }
    format!("{:.0}%", f64::from(landed) * 100.0 / f64::from(attempted))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FighterProfile {
    pub name: String,
    pub division_title: String,
    pub division_record: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub wins_by_knockout: u32,
    pub wins_by_submission: u32,
    pub wins_by_decision: u32,
    pub first_round_finishes: u32,
    /// `None` when the page carried no statistic tables.
    pub career: Option<CareerTotals>,
    pub average_fight_time: String,
    pub status: String,
    pub country: String,
    pub fighting_style: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub reach: String,
    pub trains_at: String,
    pub fight_win_streak: u32,
    pub title_defenses: u32,
    pub former_champion: bool,
    /// Most recent first.
    pub history: Vec<FightHistoryEntry>,
}

const PROFILE_COLUMNS: [&str; 30] = [
    "Name", "Division_Title", "Division_Record", "Wins", "Losses", "Draws",
    "Wins_by_Knockout", "Wins_by_Submission", "Wins_by_Decision", "First_Round_Finishes",
    "Striking_Accuracy", "Sig_Strikes_Landed", "Sig_Strikes_Attempted",
    "Takedown_Accuracy", "Takedowns_Landed", "Takedowns_Attempted", "Knockdowns",
    "Average_Fight_Time", "Total_Fights", "Status", "Country", "Fighting_Style",
    "Age", "Height", "Weight", "Reach", "Trains_at",
    "Fight_Win_Streak", "Title_Defenses", "Former_Champion",
];

impl FighterProfile {
    /// Defaulted record carrying only the page identity.
    pub fn empty(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Column layout for `recent` flattened fights. Stable across runs.
    pub fn headers(recent: usize) -> Vec<String> {
        let mut out: Vec<String> = PROFILE_COLUMNS.iter().map(|c| s!(*c)).collect();
        for n in 1..=recent {
            for field in FightHistoryEntry::SLOT_FIELDS {
                out.push(format!("Event_{n}_{field}"));
            }
        }
        out
    }

    /// One row matching `headers(recent)`. Missing fights become empty cells.
    pub fn to_row(&self, recent: usize) -> Vec<String> {
        let career = self.career.unwrap_or_default();
        let opt = |v: u32| if self.career.is_some() { v.to_string() } else { s!() };

        let mut row = vec![
            self.name.clone(),
            self.division_title.clone(),
            self.division_record.clone(),
            self.wins.to_string(),
            self.losses.to_string(),
            self.draws.to_string(),
            self.wins_by_knockout.to_string(),
            self.wins_by_submission.to_string(),
            self.wins_by_decision.to_string(),
            self.first_round_finishes.to_string(),
            career.striking_accuracy(),
            opt(career.sig_strikes_landed),
            opt(career.sig_strikes_attempted),
            career.takedown_accuracy(),
            opt(career.takedowns_landed),
            opt(career.takedowns_attempted),
            opt(career.knockdowns),
            self.average_fight_time.clone(),
            self.history.len().to_string(),
            self.status.clone(),
            self.country.clone(),
            self.fighting_style.clone(),
            self.age.clone(),
            self.height.clone(),
            self.weight.clone(),
            self.reach.clone(),
            self.trains_at.clone(),
            self.fight_win_streak.to_string(),
            self.title_defenses.to_string(),
            self.former_champion.to_string(),
        ];

        for slot in crate::derive::recent_fights(&self.history, recent) {
            match slot {
                Some(entry) => row.extend(entry.slot_cells()),
                None => row.extend(std::iter::repeat_n(s!(), FightHistoryEntry::SLOT_FIELDS.len())),
            }
        }
        row
    }
}

/* ---------------- Fight statistic tables ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Striking,
    Clinch,
    Ground,
}

const STRIKING_COLUMNS: &[&str] = &[
    "Date", "Opponent", "Event", "Result", "SDBL/A", "SDHL/A", "SDLL/A",
    "TSL", "TSA", "SSL", "SSA", "TSL-TSA", "KD", "%BODY", "%HEAD", "%LEG",
];
const CLINCH_COLUMNS: &[&str] = &[
    "Date", "Opponent", "Event", "Result", "SCBL", "SCBA", "SCHL", "SCHA",
    "SCLL", "SCLA", "RV", "SR", "TDL", "TDA", "TDS", "TK ACC",
];
const GROUND_COLUMNS: &[&str] = &[
    "Date", "Opponent", "Event", "Result", "SGBL", "SGBA", "SGHL", "SGHA",
    "SGLL", "SGLA", "AD", "ADHG", "ADTB", "ADTM", "ADTS", "SM",
];

impl StatCategory {
    pub const ALL: [StatCategory; 3] = [StatCategory::Striking, StatCategory::Clinch, StatCategory::Ground];

    /// Category columns, without the leading `Player`.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            StatCategory::Striking => STRIKING_COLUMNS,
            StatCategory::Clinch => CLINCH_COLUMNS,
            StatCategory::Ground => GROUND_COLUMNS,
        }
    }

    pub fn headers(self) -> Vec<String> {
        std::iter::once("Player")
            .chain(self.columns().iter().copied())
            .map(String::from)
            .collect()
    }

    /// Match a table title such as "Striking" or "Ground Stats".
    pub fn from_title(title: &str) -> Option<Self> {
        let t = title.to_ascii_lowercase();
        if t.contains("strik") { Some(StatCategory::Striking) }
        else if t.contains("clinch") { Some(StatCategory::Clinch) }
        else if t.contains("ground") { Some(StatCategory::Ground) }
        else { None }
    }

    pub fn table_kind(self) -> TableKind {
        match self {
            StatCategory::Striking => TableKind::Striking,
            StatCategory::Clinch => TableKind::Clinch,
            StatCategory::Ground => TableKind::Ground,
        }
    }
}

/// Rows laid out as `category.headers()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatTable {
    pub category: StatCategory,
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_parse_loosely() {
        assert_eq!(FightResult::parse(" w "), FightResult::Win);
        assert_eq!(FightResult::parse("Loss"), FightResult::Loss);
        assert_eq!(FightResult::parse("D"), FightResult::Draw);
        assert_eq!(FightResult::parse("NC").as_str(), "NC");
        assert!(!FightResult::parse("").is_win());
    }

    #[test]
    fn row_matches_headers() {
        let mut p = FighterProfile::empty("Test Fighter");
        p.history.push(FightHistoryEntry {
            date: s!("2024-03-02"),
            opponent: s!("Someone"),
            result: FightResult::Win,
            event: s!("UFC 299"),
            method: s!("KO/TKO"),
            round: s!("1"),
            time: s!("2:10"),
            title_fight: false,
        });
        let headers = FighterProfile::headers(3);
        let row = p.to_row(3);
        assert_eq!(headers.len(), row.len());
        assert_eq!(headers.len(), 30 + 3 * 7);

        let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
        assert_eq!(row[col("Name")], "Test Fighter");
        assert_eq!(row[col("Event_1_Opponent")], "Someone");
        assert_eq!(row[col("Total_Fights")], "1");
        assert_eq!(row[col("Former_Champion")], "false");
        assert_eq!(row[col("Sig_Strikes_Landed")], "");
        assert!(row[col("Event_2_Headline")..].iter().all(String::is_empty));
    }

    #[test]
    fn accuracy_is_empty_without_attempts() {
        let totals = CareerTotals { sig_strikes_landed: 45, sig_strikes_attempted: 100, ..Default::default() };
        assert_eq!(totals.striking_accuracy(), "45%");
        assert_eq!(totals.takedown_accuracy(), "");
    }

    #[test]
    fn stat_titles() {
        assert_eq!(StatCategory::from_title("Striking"), Some(StatCategory::Striking));
        assert_eq!(StatCategory::from_title("GROUND"), Some(StatCategory::Ground));
        assert_eq!(StatCategory::from_title("Totals"), None);
        assert_eq!(StatCategory::Clinch.headers()[0], "Player");
        assert_eq!(StatCategory::Clinch.headers().len(), 17);
    }
}
