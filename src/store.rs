// src/store.rs
//! Persisted tables and the incremental merge.
//!
//! A table is a header row plus string rows. Merging is insert-if-absent on a
//! composite key: rows already on disk are never rewritten or dropped, and an
//! incoming row only lands if its key is new.

use std::collections::HashSet;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::consts::STORE_SEP;
use crate::config::{Config, TableKind};
use crate::csv::{parse_rows, split_headers, write_table};
use crate::error::{MergeSkip, StoreError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers: Some(headers), rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }

    /// Cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let c = self.column(column)?;
        self.rows.get(row)?.get(c).map(String::as_str)
    }
}

/* ---------------- Merge ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub existing: usize,
    pub appended: usize,
    /// Incoming rows whose key was already present.
    pub duplicates: usize,
    pub skipped: Vec<MergeSkip>,
}

impl MergeReport {
    pub fn total(&self) -> usize {
        self.existing + self.appended
    }
}

#[derive(Clone, Debug)]
pub struct Merge {
    pub dataset: DataSet,
    pub report: MergeReport,
}

type Key = Vec<String>;

fn key_indices(headers: &[String], keys: &[String]) -> Result<Vec<usize>, String> {
    keys.iter()
        .map(|k| {
            headers.iter().position(|h| h == k).ok_or_else(|| format!("no \"{k}\" column"))
        })
        .collect()
}

fn row_key(row: &[String], idx: &[usize]) -> Option<Key> {
    idx.iter().map(|&i| row.get(i).cloned()).collect()
}

/// Union header: `existing` as-is, then incoming columns it lacks.
fn union_headers(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut out = existing.to_vec();
    for h in incoming {
        if !out.contains(h) {
            out.push(h.clone());
        }
    }
    out
}

/// Re-lay `row` from `from` columns onto `to` columns. Absent cells are empty.
/// Cells past the end of `from` are kept at the end of the row.
fn align(mut row: Vec<String>, from: &[String], to: &[String]) -> Vec<String> {
    let extra = if row.len() > from.len() {
        logw!("merge: row has {} cells for {} columns; extra cells kept", row.len(), from.len());
        row.split_off(from.len())
    } else {
        Vec::new()
    };
    let mut out = if from == to {
        row.resize(to.len(), s!());
        row
    } else {
        let mut cells: Vec<Option<String>> = row.into_iter().map(Some).collect();
        to.iter()
            .map(|col| {
                from.iter()
                    .position(|h| h == col)
                    .and_then(|i| cells.get_mut(i).and_then(Option::take))
                    .unwrap_or_default()
            })
            .collect()
    };
    out.extend(extra);
    out
}

/// Insert-if-absent merge of `incoming` into `existing` on `keys`.
///
/// - empty `existing` → `incoming` adopted (duplicate keys inside it collapsed)
/// - empty `incoming` → `existing` unchanged
/// - otherwise `existing ++ incoming rows with unseen keys`
///
/// An incoming row lacking a key column is skipped and reported, never fatal.
pub fn upsert(existing: DataSet, incoming: DataSet, keys: &[String]) -> Merge {
    let mut report = MergeReport { existing: existing.rows.len(), ..MergeReport::default() };

    if incoming.rows.is_empty() {
        return Merge { dataset: existing, report };
    }

    let in_headers = incoming.headers.unwrap_or_default();
    let headers = match &existing.headers {
        Some(h) if !h.is_empty() => union_headers(h, &in_headers),
        _ => in_headers.clone(),
    };
    let ex_headers = existing.headers.unwrap_or_else(|| headers.clone());

    let key_idx = match key_indices(&headers, keys) {
        Ok(idx) => idx,
        Err(reason) => {
            report.skipped = (0..incoming.rows.len())
                .map(|row| MergeSkip { row, reason: reason.clone() })
                .collect();
            logw!("merge: {reason}; {} incoming rows skipped", incoming.rows.len());
            return Merge { dataset: DataSet { headers: Some(ex_headers), rows: existing.rows }, report };
        }
    };

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(existing.rows.len() + incoming.rows.len());
    let mut seen: HashSet<Key> = HashSet::with_capacity(rows.capacity());

    for row in existing.rows {
        let row = align(row, &ex_headers, &headers);
        if let Some(k) = row_key(&row, &key_idx) {
            seen.insert(k);
        }
        rows.push(row);
    }

    for (i, row) in incoming.rows.into_iter().enumerate() {
        let width = row.len();
        let row = align(row, &in_headers, &headers);
        let key = match row_key(&row, &key_idx) {
            Some(k) if width > 0 && k.iter().any(|c| !c.is_empty()) => k,
            _ => {
                report.skipped.push(MergeSkip { row: i, reason: s!("empty key") });
                continue;
            }
        };
        if seen.insert(key) {
            rows.push(row);
            report.appended += 1;
        } else {
            report.duplicates += 1;
        }
    }

    for skip in &report.skipped {
        logw!("merge: {skip}");
    }
    logf!(
        "merge: {} + {} = {} ({} duplicate, {} skipped)",
        report.existing, report.appended, report.total(), report.duplicates, report.skipped.len()
    );

    Merge { dataset: DataSet { headers: Some(headers), rows }, report }
}

/* ---------------- Disk ---------------- */

/// Load a table; a missing file is an empty table.
pub fn load_dataset(path: &Path) -> Result<DataSet, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(DataSet::default()),
        Err(e) => return Err(StoreError::io("read", path)(e)),
    };
    let (headers, rows) = split_headers(parse_rows(&text, STORE_SEP));
    Ok(DataSet { headers, rows })
}

/// Write to a sibling temp file, then rename over `path`.
pub fn save_dataset(path: &Path, ds: &DataSet) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(StoreError::io("create dir", dir))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let file = fs::File::create(&tmp).map_err(StoreError::io("create", &tmp))?;
    let mut w = BufWriter::new(file);
    write_table(&mut w, ds.headers.as_deref(), &ds.rows, STORE_SEP)
        .and_then(|_| w.flush())
        .map_err(StoreError::io("write", &tmp))?;
    drop(w);

    fs::rename(&tmp, path).map_err(StoreError::io("rename", path))?;
    logf!("saved {} rows to {}", ds.rows.len(), path.display());
    Ok(())
}

/// Copy every existing table file into `backups/backup_YYYYmmdd_HHMMSS/`.
/// Returns the folder, or `None` when there was nothing to back up.
pub fn backup_tables(config: &Config) -> Result<Option<PathBuf>, StoreError> {
    let present: Vec<(TableKind, PathBuf)> = TableKind::ALL
        .into_iter()
        .map(|k| (k, config.table_path(k)))
        .filter(|(_, p)| p.is_file())
        .collect();
    if present.is_empty() {
        return Ok(None);
    }

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let dir = config.backup_dir().join(format!("backup_{stamp}"));
    fs::create_dir_all(&dir).map_err(StoreError::io("create dir", &dir))?;

    for (kind, src) in present {
        let dst = dir.join(kind.file_name());
        fs::copy(&src, &dst).map_err(StoreError::io("back up", &src))?;
    }
    logf!("backup created at {}", dir.display());
    Ok(Some(dir))
}
