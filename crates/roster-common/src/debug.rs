//! Debug journal for repository mutations.
//!
//! Appends one JSON line per mutation so the history of a store can be
//! reconstructed when chasing a lost or duplicated record.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;

use crate::config::RosterConfig;

/// Kind of mutation applied to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationAction {
    /// New record appended
    Insert,
    /// Existing record replaced in place
    Replace,
    /// Record removed by position
    Remove,
}

/// One journal line.
#[derive(Debug, Clone, Serialize)]
pub struct MutationEntry {
    pub timestamp: DateTime<Utc>,
    /// Store key of the collection
    pub collection: String,
    pub action: MutationAction,
    /// Identity token of the affected record
    pub id: String,
    /// Position in the collection
    pub position: usize,
    /// Collection length after the mutation
    pub len: usize,
}

impl MutationEntry {
    pub fn new(collection: &str, action: MutationAction, id: impl ToString) -> Self {
        Self {
            timestamp: Utc::now(),
            collection: collection.to_string(),
            action,
            id: id.to_string(),
            position: 0,
            len: 0,
        }
    }

    pub fn at(mut self, position: usize, len: usize) -> Self {
        self.position = position;
        self.len = len;
        self
    }
}

/// JSONL mutation journal.
#[derive(Debug, Clone)]
pub struct DebugLog {
    path: Utf8PathBuf,
}

impl DebugLog {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Journal for `config`, or `None` when debugging is off.
    pub fn from_config(config: &RosterConfig) -> Option<Self> {
        config
            .debug
            .then(|| Self::new(config.debug_log_path()))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Append an entry to the journal.
    pub fn write(&self, entry: &MutationEntry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let json = serde_json::to_string(entry).unwrap_or_default();
        writeln!(file, "{}", json)?;

        Ok(())
    }

    /// Append an entry, ignoring failures.
    pub fn record(&self, entry: MutationEntry) {
        if let Err(e) = self.write(&entry) {
            tracing::debug!(path = %self.path, error = %e, "failed to write debug journal");
        }
    }
}
