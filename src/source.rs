// src/source.rs
//! Where page text comes from. The pipeline only sees `PageSource`;
//! the on-disk folder of saved fighter pages is the one shipped here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::sanitize::{safe_file_stem, stem_to_name};
use crate::data::RawPage;
use crate::error::FetchError;

pub trait PageSource: Sync {
    /// Page text for `name`, or `FetchError::NotFound` when there is none.
    fn fetch(&self, name: &str) -> Result<RawPage, FetchError>;
}

/// Saved pages named `<Name_With_Underscores>.html`.
#[derive(Clone, Debug)]
pub struct HtmlDir {
    dir: PathBuf,
}

impl HtmlDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.html", safe_file_stem(name)))
    }

    /// Fighter names for every `*.html` in the folder, sorted.
    pub fn list_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() { continue; }
            let is_html = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("html"));
            if !is_html { continue; }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem_to_name(stem));
            }
        }
        names.sort();
        Ok(names)
    }
}

impl PageSource for HtmlDir {
    fn fetch(&self, name: &str) -> Result<RawPage, FetchError> {
        let path = self.path_for(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(RawPage::new(name, String::from_utf8_lossy(&bytes))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FetchError::NotFound { name: s!(name), path })
            }
            Err(source) => Err(FetchError::Io { name: s!(name), path, source }),
        }
    }
}
