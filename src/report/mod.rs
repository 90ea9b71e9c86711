//! Durable per-sample run reports.
//!
//! Every pipeline stage records its metrics into the sample's [`Report`],
//! which persists the complete mapping to disk after each update. A run that
//! dies halfway still leaves a usable diagnostic file covering every stage
//! that finished.
//!
//! Persistence is atomic: the mapping is serialized to a temporary file in
//! the report's directory and renamed over the target path. An observer
//! never sees a half-written report, only the state as of the last completed
//! [`Report::set`].
//!
//! Keys keep insertion order (serde_json's `preserve_order` feature) and are
//! only ever added or overwritten; re-running a stage simply rewrites its
//! keys.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to replace report file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// An insertion-ordered key/value report bound to one file on disk.
#[derive(Debug)]
pub struct Report {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl Report {
    /// Bind a report to `path`, resuming from its contents if the file
    /// already exists (e.g. when later stages are re-run on a sample).
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Io` if an existing file cannot be read, or
    /// `ReportError::Json` if it holds something other than a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Map::new()
        };
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set one key and persist the whole mapping.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Json` if `value` cannot be serialized, or a
    /// persistence error; the in-memory mapping is updated either way.
    pub fn set(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<(), ReportError> {
        self.entries.insert(key.into(), serde_json::to_value(value)?);
        self.persist()
    }

    /// Set every entry in iteration order, persisting once at the end.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Json` if any value fails to serialize (entries
    /// before it are still applied in memory), or a persistence error.
    pub fn set_many<K, V, I>(&mut self, entries: I) -> Result<(), ReportError>
    where
        K: Into<String>,
        V: Serialize,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.entries.insert(key.into(), serde_json::to_value(value)?);
        }
        self.persist()
    }

    /// Write the full mapping to disk via a temporary file and atomic rename.
    fn persist(&self) -> Result<(), ReportError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, &self.entries)?;
        temp.write_all(b"\n")?;
        temp.flush()?;
        temp.persist(&self.path)?;
        Ok(())
    }
}
