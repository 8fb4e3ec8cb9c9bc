// src/cli.rs
use std::{fs, io, path::{Path, PathBuf}};

use log::{LevelFilter, SetLoggerError};
use thiserror::Error;

use crate::config::{ self, consts::{CONFIG_FILE, STORE_SEP}, Config };
use crate::csv::parse_rows;
use crate::error::StoreError;
use crate::progress::Progress;
use crate::runner::{ self, RunSummary };
use crate::source::HtmlDir;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("{flag} expects a number, got '{value}'")]
    BadNumber { flag: &'static str, value: String },

    #[error("unknown argument: {0}")]
    UnknownArg(String),

    #[error("no fighters given (use -f, --fighters or --all-html)")]
    NoFighters,

    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, #[source] source: io::Error },

    #[error("logger: {0}")]
    Logger(#[from] SetLoggerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parsed command line. `None` fields leave the config file's value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub data_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub fighters: Vec<String>,
    pub fighters_csv: Option<PathBuf>,
    pub all_html: bool,
    pub recent: Option<usize>,
    pub root_key: Option<String>,
    pub workers: Option<usize>,
    pub no_backup: bool,
    pub summary: bool,
    pub verbose: bool,
}

pub enum Action {
    Help,
    Run(Args),
}

pub const HELP: &str = include_str!("cli_help.txt");

fn number(flag: &'static str, v: Option<String>) -> Result<usize, CliError> {
    let v = v.ok_or(CliError::MissingValue(flag))?;
    v.parse().map_err(|_| CliError::BadNumber { flag, value: v })
}

pub fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Action, CliError> {
    let mut a = Args::default();
    let mut args = argv.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str()
        {
            "--data" => a.data_dir = Some(args.next().ok_or(CliError::MissingValue("--data"))?.into()),
            "--config" => a.config_file = Some(args.next().ok_or(CliError::MissingValue("--config"))?.into()),
            "-f" | "--fighter" => a.fighters.push(args.next().ok_or(CliError::MissingValue("--fighter"))?),
            "--fighters" => a.fighters_csv = Some(args.next().ok_or(CliError::MissingValue("--fighters"))?.into()),
            "--all-html" => a.all_html = true,
            "--recent" => a.recent = Some(number("--recent", args.next())?),
            "--root-key" => a.root_key = Some(args.next().ok_or(CliError::MissingValue("--root-key"))?),
            "--workers" => a.workers = Some(number("--workers", args.next())?.max(1)),
            "--no-backup" => a.no_backup = true,
            "--summary" => a.summary = true,
            "-v" | "--verbose" => a.verbose = true,
            "-h" | "--help" => return Ok(Action::Help),
            _ => return Err(CliError::UnknownArg(arg)),
        }
    }
    Ok(Action::Run(a))
}

/// Config file (explicit, or `scrape.conf` if present) with flags on top.
pub fn build_config(a: &Args) -> Config {
    let file = a.config_file.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let mut cfg = config::file::load(&file);

    if let Some(d) = &a.data_dir { cfg.data_dir = d.clone(); }
    if let Some(n) = a.recent { cfg.recent_fights = n; }
    if let Some(k) = &a.root_key { cfg.root_key = k.clone(); }
    if let Some(w) = a.workers { cfg.workers = w; }
    if a.no_backup { cfg.backup = false; }
    if a.verbose { cfg.log_level = LevelFilter::Debug; }
    cfg
}

/// Names from a CSV: the `Fighter Name` or `Name` column when the first row
/// has one, otherwise the first column of every row.
pub fn read_fighter_list(path: &Path) -> Result<Vec<String>, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    let rows = parse_rows(&text, STORE_SEP);

    let named = rows.first().and_then(|h| {
        h.iter().position(|c| {
            let c = c.trim();
            c.eq_ignore_ascii_case("Fighter Name") || c.eq_ignore_ascii_case("Name")
        })
    });
    let (col, skip) = match named {
        Some(i) => (i, 1),
        None => (0, 0),
    };
    Ok(rows
        .iter()
        .skip(skip)
        .filter_map(|r| r.get(col))
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect())
}

fn resolve_names(a: &Args, source: &HtmlDir) -> Result<Vec<String>, CliError> {
    let mut names = a.fighters.clone();
    if let Some(p) = &a.fighters_csv {
        names.extend(read_fighter_list(p)?);
    }
    if a.all_html {
        let listed = source
            .list_names()
            .map_err(|source_err| CliError::Io { path: source.dir().to_path_buf(), source: source_err })?;
        names.extend(listed);
    }
    let mut seen = std::collections::HashSet::new();
    names.retain(|n| seen.insert(n.clone()));
    Ok(names)
}

/// Prints one line per page.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_done(&mut self, name: &str) {
        self.done += 1;
        println!("[{}/{}] {name}", self.done, self.total);
    }
    fn item_failed(&mut self, name: &str, reason: &str) {
        self.done += 1;
        println!("[{}/{}] {name}: skipped ({reason})", self.done, self.total);
    }
}

fn print_summary(summary: &RunSummary) {
    if let Some(dir) = &summary.backup {
        println!("Backup: {}", dir.display());
    }
    for t in &summary.tables {
        let r = &t.report;
        println!(
            "{:<9} {} existing + {} new = {} ({} duplicate, {} skipped){}",
            t.kind.label(), r.existing, r.appended, r.total(), r.duplicates, r.skipped.len(),
            if t.written { "" } else { ", unchanged" },
        );
    }
    println!("Pages: {} ok, {} failed", summary.pages_ok(), summary.pages_failed());
    for (name, err) in summary.batch.failures() {
        println!("  {name}: {err}");
    }
    for x in summary.batch.extractions() {
        if let Some(w) = &x.warning {
            println!("  {}: defaulted profile ({w})", x.profile.name);
        }
    }
}

pub fn run(a: Args) -> Result<(), CliError> {
    let cfg = build_config(&a);
    crate::logger::init(&cfg.log_path(), cfg.log_level)?;

    if a.summary {
        for (kind, rows) in runner::summary(&cfg)? {
            match rows {
                Some(n) => println!("{:<9} {n} rows  {}", kind.label(), cfg.table_path(kind).display()),
                None => println!("{:<9} (no file)", kind.label()),
            }
        }
        return Ok(());
    }

    let source = HtmlDir::new(cfg.html_dir());
    let names = resolve_names(&a, &source)?;
    if names.is_empty() {
        return Err(CliError::NoFighters);
    }

    let mut progress = CliProgress::default();
    let summary = runner::run(&cfg, &names, &source, Some(&mut progress))?;
    print_summary(&summary);
    Ok(())
}
