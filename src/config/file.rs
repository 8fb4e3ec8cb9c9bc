// src/config/file.rs
//! Optional `key = value` config file layered over `Config::default()`.
//!
//! ```text
//! # scrape.conf
//! data_dir = data
//! root_key = prtlCmnApiRsp
//! recent_fights = 3
//! fight_stat_keys = Player, Date, Opponent, Event
//! backup = false
//! ```
use std::{fs, path::{Path, PathBuf}};

use log::LevelFilter;

use super::options::Config;

/// Load `path` over the defaults. A missing or unreadable file yields the defaults.
pub fn load(path: &Path) -> Config {
    let mut cfg = Config::default();
    if let Ok(text) = fs::read_to_string(path) {
        apply(&mut cfg, &text);
    }
    cfg
}

/// Apply the settings in `text` onto `cfg`. Bad values leave the field untouched.
pub fn apply(cfg: &mut Config, text: &str) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some(eq) = line.find('=') else {
            logw!("config: ignoring line without '=': {line}");
            continue;
        };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();
        match key {
            "data_dir" => cfg.data_dir = PathBuf::from(val),
            "html_subdir" => cfg.html_subdir = s!(val),
            "root_key" if !val.is_empty() => cfg.root_key = s!(val),
            "recent_fights" => set_number(&mut cfg.recent_fights, key, val),
            "workers" => {
                set_number(&mut cfg.workers, key, val);
                cfg.workers = cfg.workers.max(1);
            }
            "profile_keys" => set_list(&mut cfg.profile_keys, key, val),
            "fight_stat_keys" => set_list(&mut cfg.fight_stat_keys, key, val),
            "backup" => cfg.backup = parse_bool(val),
            "log_level" => match val.parse::<LevelFilter>() {
                Ok(level) => cfg.log_level = level,
                Err(_) => logw!("config: bad log_level '{val}'"),
            },
            other => logw!("config: unknown key '{other}'"),
        }
    }
}

fn set_number(slot: &mut usize, key: &str, val: &str) {
    match val.parse::<usize>() {
        Ok(n) => *slot = n,
        Err(_) => logw!("config: '{key}' expects a number, got '{val}'"),
    }
}

fn set_list(slot: &mut Vec<String>, key: &str, val: &str) {
    let list: Vec<String> = val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if list.is_empty() {
        logw!("config: '{key}' needs at least one column");
    } else {
        *slot = list;
    }
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_and_ignores() {
        let mut cfg = Config::default();
        apply(&mut cfg, "
            # comment
            data_dir = /tmp/fights
            recent_fights = 5
            fight_stat_keys = Player, Date, Opponent, Event
            backup = false
            workers = 0
            mystery = 1
            garbage line
        ");
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/fights"));
        assert_eq!(cfg.recent_fights, 5);
        assert_eq!(cfg.fight_stat_keys, vec!["Player", "Date", "Opponent", "Event"]);
        assert!(!cfg.backup);
        assert_eq!(cfg.workers, 1);
        assert_eq!(cfg.root_key, "prtlCmnApiRsp");
    }

    #[test]
    fn bad_values_keep_defaults() {
        let mut cfg = Config::default();
        apply(&mut cfg, "recent_fights = three\nprofile_keys = ,\nroot_key =");
        assert_eq!(cfg.recent_fights, 3);
        assert_eq!(cfg.profile_keys, vec!["Name"]);
        assert_eq!(cfg.root_key, "prtlCmnApiRsp");
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = load(Path::new("/definitely/not/here/scrape.conf"));
        assert_eq!(cfg, Config::default());
    }
}
