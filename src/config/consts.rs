// src/config/consts.rs

// Page extraction
pub const ROOT_KEY: &str = "prtlCmnApiRsp";
pub const RECENT_FIGHTS: usize = 3;
pub const ROUND_SECS: u32 = 300; // 5-minute rounds

// Local data folder
pub const DEFAULT_DATA_DIR: &str = "data";
pub const HTML_SUBDIR: &str = "FighterHTMLs";
pub const BACKUP_SUBDIR: &str = "backups";
pub const LOG_FILE: &str = "espn_processor.log";
pub const CONFIG_FILE: &str = "scrape.conf";

// Persisted tables
pub const PROFILES_FILE: &str = "fighter_profiles.csv";
pub const STRIKING_FILE: &str = "striking_data_living.csv";
pub const CLINCH_FILE: &str = "clinch_data_living.csv";
pub const GROUND_FILE: &str = "ground_data_living.csv";
pub const STORE_SEP: char = ',';

// Merge
pub const PROFILE_KEYS: &[&str] = &["Name"];
pub const FIGHT_STAT_KEYS: &[&str] = &["Player", "Date", "Opponent"];

// Concurrency
pub const WORKERS: usize = 4;
