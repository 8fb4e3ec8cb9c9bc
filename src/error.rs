// src/error.rs
//! Error taxonomy for the extraction pipeline.
//!
//! Everything here is recoverable at the page (or row) level. Batch code
//! collects these as values inside `scrape::PageOutcome` / `store::MergeReport`
//! instead of propagating them, so one bad page never stops a run.
//! `StoreError` is the only kind that ends a run early.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The fetch layer could not supply page text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no page for \"{name}\" (looked for {})", path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("failed to read page for \"{name}\" from {}: {source}", path.display())]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The embedded object could not be located in the page text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("key \"{key}\" with an object value not found")]
    NotFound { key: String },

    #[error("object for \"{key}\" opened at byte {start} never closes (depth {depth} at end of text)")]
    UnbalancedSpan { key: String, start: usize, depth: usize },
}

/// The located span is still not valid JSON after normalization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid JSON at byte {offset} (line {line}, column {column}): {message}; near `{snippet}`")]
pub struct ParseError {
    /// Byte offset into the normalized text.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub snippet: String,
    pub message: String,
}

/// Parsed JSON that does not look like any known page shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("no known page shape matches (top-level keys: {})", keys.join(", "))]
    UnknownShape { keys: Vec<String> },

    #[error("{shape} shape is missing its \"{node}\" node")]
    MissingNode { shape: &'static str, node: &'static str },
}

/// An incoming row that could not be merged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("incoming row {row} skipped: {reason}")]
pub struct MergeSkip {
    pub row: usize,
    pub reason: String,
}

/// Anything that makes a single page unusable.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PageError {
    /// Short category label for per-fighter reports.
    pub fn kind(&self) -> &'static str {
        match self {
            PageError::Fetch(FetchError::NotFound { .. }) => "page missing",
            PageError::Fetch(FetchError::Io { .. }) => "read failed",
            PageError::Extract(ExtractError::NotFound { .. }) => "key not found",
            PageError::Extract(ExtractError::UnbalancedSpan { .. }) => "unbalanced object",
            PageError::Parse(_) => "invalid json",
        }
    }
}

/// Failures touching the persisted tables. These end the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| StoreError::Io { op, path, source }
    }
}
