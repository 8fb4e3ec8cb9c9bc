// src/scrape.rs
use std::{
    thread,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }},
};

use crate::{
    config::{ Config, TableKind },
    core::{ self, locate },
    data::{ FighterProfile, RawPage, StatCategory, StatTable },
    error::{ MappingError, PageError },
    progress::Progress,
    source::PageSource,
    specs::{ self, Shape },
    store::DataSet,
};

/// What one page produced.
#[derive(Clone, Debug)]
pub struct Extraction {
    pub profile: FighterProfile,
    pub stats: Vec<StatTable>,
    /// `None` when the tree matched no known shape.
    pub shape: Option<Shape>,
    /// Set when the profile is a defaulted stand-in.
    pub warning: Option<MappingError>,
}

#[derive(Debug)]
pub struct PageOutcome {
    pub name: String,
    pub result: Result<Extraction, PageError>,
}

/// Locate, parse and map one page. Only a page that cannot be read as JSON
/// is an error; an unrecognised tree yields a defaulted profile.
pub fn process_page(page: &RawPage, config: &Config) -> Result<Extraction, PageError> {
    let span = locate::locate(&page.text, &config.root_key)?;
    logd!("{}: '{}' object at {}..{} ({} bytes)", page.name, config.root_key, span.start, span.end, span.len());

    let tree = core::parse(span.slice(&page.text))?;

    Ok(match specs::map_page(&tree, &page.name) {
        Ok(mapped) => Extraction {
            profile: mapped.profile,
            stats: mapped.stats,
            shape: Some(mapped.shape),
            warning: None,
        },
        Err(e) => {
            logw!("{}: {e}; writing a defaulted profile", page.name);
            Extraction {
                profile: FighterProfile::empty(page.name.as_str()),
                stats: Vec::new(),
                shape: None,
                warning: Some(e),
            }
        }
    })
}

fn fetch_and_process(source: &dyn PageSource, name: &str, config: &Config) -> PageOutcome {
    let result = source
        .fetch(name)
        .map_err(PageError::from)
        .and_then(|page| process_page(&page, config));
    if let Err(e) = &result {
        logw!("{name}: skipped ({}): {e}", e.kind());
    }
    PageOutcome { name: s!(name), result }
}

fn report(outcome: &PageOutcome, progress: Option<&mut (dyn Progress + '_)>) {
    if let Some(p) = progress {
        match &outcome.result {
            Ok(_) => p.item_done(&outcome.name),
            Err(e) => p.item_failed(&outcome.name, e.kind()),
        }
    }
}

/// Outcomes in input order.
#[derive(Debug, Default)]
pub struct Batch {
    pub outcomes: Vec<PageOutcome>,
}

impl Batch {
    pub fn extractions(&self) -> impl Iterator<Item = &Extraction> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &PageError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }

    pub fn succeeded(&self) -> usize {
        self.extractions().count()
    }

    /// Incoming rows for one table family, laid out for that table.
    pub fn incoming(&self, kind: TableKind, recent: usize) -> DataSet {
        let category = match kind {
            TableKind::Profiles => {
                let rows = self.extractions().map(|x| x.profile.to_row(recent)).collect();
                return DataSet::new(FighterProfile::headers(recent), rows);
            }
            TableKind::Striking => StatCategory::Striking,
            TableKind::Clinch => StatCategory::Clinch,
            TableKind::Ground => StatCategory::Ground,
        };
        let rows = self
            .extractions()
            .flat_map(|x| x.stats.iter())
            .filter(|t| t.category == category)
            .flat_map(|t| t.rows.iter().cloned())
            .collect();
        DataSet::new(category.headers(), rows)
    }
}

/// Fetch and map every name. Per-page failures land in the batch;
/// nothing here aborts early.
pub fn collect(
    names: &[String],
    source: &dyn PageSource,
    config: &Config,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Batch {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(names.len());
        p.log("Processing pages…");
    }

    let workers = config.workers.min(names.len()).max(1);
    let mut slots: Vec<Option<PageOutcome>> = names.iter().map(|_| None).collect();

    if workers == 1 {
        for (i, name) in names.iter().enumerate() {
            let outcome = fetch_and_process(source, name, config);
            report(&outcome, progress.as_deref_mut());
            slots[i] = Some(outcome);
        }
    } else {
        let counter = AtomicUsize::new(0);
        let (res_tx, res_rx) = mpsc::channel::<(usize, PageOutcome)>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let idx = &counter;
                let tx = res_tx.clone();
                scope.spawn(move || loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= names.len() {
                        break;
                    }
                    let _ = tx.send((i, fetch_and_process(source, &names[i], config)));
                });
            }
            drop(res_tx); // this thread is sole receiver now

            for (i, outcome) in res_rx.iter() {
                report(&outcome, progress.as_deref_mut());
                slots[i] = Some(outcome);
            }
        });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Batch { outcomes: slots.into_iter().flatten().collect() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, FetchError};
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MemSource(HashMap<String, String>);

    impl PageSource for MemSource {
        fn fetch(&self, name: &str) -> Result<RawPage, FetchError> {
            self.0
                .get(name)
                .map(|t| RawPage::new(name, t.as_str()))
                .ok_or_else(|| FetchError::NotFound { name: s!(name), path: PathBuf::from(name) })
        }
    }

    fn source() -> MemSource {
        let mut pages = HashMap::new();
        pages.insert(
            s!("Test Fighter"),
            s!(r#"<script>x={"prtlCmnApiRsp":{"athlete":{"displayName":"Test Fighter","statsSummary":{"statistics":[{"name":"wins-losses-draws","displayValue":"10-2-0"}]}}}};</script>"#),
        );
        pages.insert(s!("No Key"), s!("<html></html>"));
        pages.insert(s!("Broken"), s!(r#""prtlCmnApiRsp":{"athlete": {"x": tru}}"#));
        pages.insert(s!("Odd Shape"), s!(r#""prtlCmnApiRsp":{"somethingElse":{}}"#));
        MemSource(pages)
    }

    fn names() -> Vec<String> {
        ["Test Fighter", "No Key", "Missing", "Broken", "Odd Shape"].map(String::from).to_vec()
    }

    fn check(batch: &Batch) {
        let got: Vec<&str> = batch.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(got, ["Test Fighter", "No Key", "Missing", "Broken", "Odd Shape"]);
        assert_eq!(batch.succeeded(), 2);

        let kinds: Vec<&str> = batch.failures().map(|(_, e)| e.kind()).collect();
        assert_eq!(kinds, ["key not found", "page missing", "invalid json"]);
        assert!(matches!(
            batch.outcomes[1].result,
            Err(PageError::Extract(ExtractError::NotFound { .. }))
        ));

        let odd = batch.outcomes[4].result.as_ref().unwrap();
        assert!(odd.warning.is_some());
        assert_eq!(odd.profile.name, "Odd Shape");

        let profiles = batch.incoming(TableKind::Profiles, 3);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles.get(0, "Name"), Some("Test Fighter"));
        assert_eq!(profiles.get(0, "Division_Record"), Some("10-2-0"));
        assert!(batch.incoming(TableKind::Striking, 3).is_empty());
    }

    #[test]
    fn sequential_batch_survives_bad_pages() {
        let config = Config { workers: 1, ..Config::default() };
        check(&collect(&names(), &source(), &config, None));
    }

    #[test]
    fn pooled_batch_keeps_input_order() {
        let config = Config { workers: 3, ..Config::default() };
        check(&collect(&names(), &source(), &config, None));
    }

    #[derive(Default)]
    struct Recorder {
        total: usize,
        done: Vec<String>,
        failed: Vec<String>,
        finished: bool,
    }

    impl Progress for Recorder {
        fn begin(&mut self, total: usize) { self.total = total; }
        fn item_done(&mut self, name: &str) { self.done.push(s!(name)); }
        fn item_failed(&mut self, name: &str, _reason: &str) { self.failed.push(s!(name)); }
        fn finish(&mut self) { self.finished = true; }
    }

    #[test]
    fn progress_sees_every_page() {
        for workers in [1, 3] {
            let config = Config { workers, ..Config::default() };
            let mut rec = Recorder::default();
            let batch = collect(&names(), &source(), &config, Some(&mut rec));
            check(&batch);
            assert_eq!(rec.total, 5);
            assert_eq!(rec.done.len() + rec.failed.len(), 5);
            assert_eq!(rec.done.len(), 2);
            assert!(rec.finished);
        }
    }
}
