//! Common plumbing for the roster crates.
//!
//! This crate provides:
//! - Key-value blob storage (file-backed and in-memory)
//! - Configuration from the environment
//! - The mutation debug journal

pub mod config;
pub mod debug;
pub mod store;

pub use config::RosterConfig;
pub use debug::{DebugLog, MutationAction, MutationEntry};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::RosterConfig;
    pub use crate::debug::DebugLog;
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
    pub use anyhow::{Context, Result};
}
