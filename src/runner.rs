// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::{ Config, TableKind },
    error::StoreError,
    progress::Progress,
    scrape::{ self, Batch },
    source::PageSource,
    store::{ self, MergeReport },
};

/// Per-table result of one run.
#[derive(Clone, Debug)]
pub struct TableResult {
    pub kind: TableKind,
    pub path: PathBuf,
    pub report: MergeReport,
    /// False when nothing new arrived and the file was left alone.
    pub written: bool,
}

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub backup: Option<PathBuf>,
    pub batch: Batch,
    pub tables: Vec<TableResult>,
}

impl RunSummary {
    pub fn pages_ok(&self) -> usize {
        self.batch.succeeded()
    }

    pub fn pages_failed(&self) -> usize {
        self.batch.outcomes.len() - self.batch.succeeded()
    }
}

/// Back up, process every page, merge each table family and save.
/// Page failures are reported in the summary; only store I/O ends a run.
pub fn run(
    config: &Config,
    names: &[String],
    source: &dyn PageSource,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, StoreError> {
    logf!("run: {} pages from {}", names.len(), config.data_dir.display());

    let backup = if config.backup { store::backup_tables(config)? } else { None };

    let batch = scrape::collect(names, source, config, progress.as_deref_mut());

    let mut tables = Vec::with_capacity(TableKind::ALL.len());
    for kind in TableKind::ALL {
        let path = config.table_path(kind);
        let incoming = batch.incoming(kind, config.recent_fights);
        let existing = store::load_dataset(&path).inspect_err(|e| loge!("{}: {e}", kind.label()))?;

        let merge = store::upsert(existing, incoming, config.key_columns(kind));
        let written = merge.report.appended > 0;
        if written {
            store::save_dataset(&path, &merge.dataset).inspect_err(|e| loge!("{}: {e}", kind.label()))?;
        }
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!(
                "{}: {} + {} new = {}",
                kind.label(), merge.report.existing, merge.report.appended, merge.report.total()
            ));
        }
        tables.push(TableResult { kind, path, report: merge.report, written });
    }

    logf!("run: {} pages ok, {} failed", batch.succeeded(), batch.outcomes.len() - batch.succeeded());
    Ok(RunSummary { backup, batch, tables })
}

/// Row counts of the persisted tables; `None` for a table not yet created.
pub fn summary(config: &Config) -> Result<Vec<(TableKind, Option<usize>)>, StoreError> {
    TableKind::ALL
        .into_iter()
        .map(|kind| {
            let path = config.table_path(kind);
            if !path.is_file() {
                return Ok((kind, None));
            }
            Ok((kind, Some(store::load_dataset(&path)?.len())))
        })
        .collect()
}
