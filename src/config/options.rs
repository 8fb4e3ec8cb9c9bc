// src/config/options.rs
use std::path::PathBuf;

use log::LevelFilter;

use super::consts::*;

/// Everything a run needs, passed explicitly into each component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Folder holding the persisted tables, the HTML pages and backups.
    pub data_dir: PathBuf,
    pub html_subdir: String,
    /// JSON key whose object value is located in each page.
    pub root_key: String,
    /// How many most-recent fights are flattened into `Event_N_*` columns.
    pub recent_fights: usize,
    pub profile_keys: Vec<String>,
    pub fight_stat_keys: Vec<String>,
    pub backup: bool,
    /// Page workers; 1 processes pages strictly in order on the caller's thread.
    pub workers: usize,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            html_subdir: s!(HTML_SUBDIR),
            root_key: s!(ROOT_KEY),
            recent_fights: RECENT_FIGHTS,
            profile_keys: PROFILE_KEYS.iter().map(|k| s!(*k)).collect(),
            fight_stat_keys: FIGHT_STAT_KEYS.iter().map(|k| s!(*k)).collect(),
            backup: true,
            workers: WORKERS,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Self::default() }
    }

    pub fn html_dir(&self) -> PathBuf {
        self.data_dir.join(&self.html_subdir)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.data_dir.join(BACKUP_SUBDIR)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub fn table_path(&self, kind: TableKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    pub fn key_columns(&self, kind: TableKind) -> &[String] {
        match kind {
            TableKind::Profiles => &self.profile_keys,
            TableKind::Striking | TableKind::Clinch | TableKind::Ground => &self.fight_stat_keys,
        }
    }
}

/// The persisted table families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Profiles,
    Striking,
    Clinch,
    Ground,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Profiles,
        TableKind::Striking,
        TableKind::Clinch,
        TableKind::Ground,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Profiles => PROFILES_FILE,
            TableKind::Striking => STRIKING_FILE,
            TableKind::Clinch => CLINCH_FILE,
            TableKind::Ground => GROUND_FILE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TableKind::Profiles => "profiles",
            TableKind::Striking => "striking",
            TableKind::Clinch => "clinch",
            TableKind::Ground => "ground",
        }
    }
}
