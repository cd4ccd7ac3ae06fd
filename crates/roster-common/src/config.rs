//! Runtime configuration resolved from the environment.

use camino::{Utf8Path, Utf8PathBuf};

/// Overrides the data directory.
pub const DATA_DIR_VAR: &str = "ROSTER_DATA_DIR";

/// Enables the mutation debug journal when set.
pub const DEBUG_VAR: &str = "ROSTER_DEBUG";

/// Marker file inside the data directory that also enables the journal.
pub const DEBUG_MARKER: &str = ".roster-debug";

/// Where the roster lives and how noisy it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Directory holding the persisted collections
    pub data_dir: Utf8PathBuf,
    /// Whether mutations are journaled to `logs/mutations.jsonl`
    pub debug: bool,
}

impl RosterConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration using `lookup` in place of the environment.
    ///
    /// Priority for the data directory:
    /// 1. `ROSTER_DATA_DIR` (if set and non-empty)
    /// 2. `<platform data dir>/roster`
    /// 3. `./.roster`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(Utf8PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let debug = lookup(DEBUG_VAR).is_some() || data_dir.join(DEBUG_MARKER).exists();

        Self { data_dir, debug }
    }

    /// Replace the data directory, re-checking the debug marker in the new location.
    pub fn with_data_dir(mut self, data_dir: impl Into<Utf8PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self.debug = self.debug || self.data_dir.join(DEBUG_MARKER).exists();
        self
    }

    /// Path of the mutation journal.
    pub fn debug_log_path(&self) -> Utf8PathBuf {
        debug_log_path(&self.data_dir)
    }
}

/// Default data directory for the current user.
pub fn default_data_dir() -> Utf8PathBuf {
    dirs::data_dir()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .map(|dir| dir.join("roster"))
        .unwrap_or_else(|| Utf8PathBuf::from(".roster"))
}

/// Journal path for a given data directory.
pub fn debug_log_path(data_dir: &Utf8Path) -> Utf8PathBuf {
    data_dir.join("logs").join("mutations.jsonl")
}
