//! Configuration for slotlog
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default backing file name, matching the historical on-disk name.
pub const DEFAULT_LOG_FILENAME: &str = "appendlog.dat";

/// Default slot capacity of a log.
pub const DEFAULT_MAX_RECORDS: u32 = 1_048_576;

/// Configuration for one append-only log
///
/// Capacity is fixed for the lifetime of the log: the backing file is sized
/// to exactly `header + max_records * RECORD_SIZE` bytes at open and never
/// grows or shrinks afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the backing file shared by all participants
    pub path: PathBuf,

    /// Fixed number of record slots
    pub max_records: u32,

    /// Whether opening discards prior content (destructive truncate-to-size,
    /// the default) or keeps already-committed records (`preserve_existing`)
    pub truncate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILENAME),
            max_records: DEFAULT_MAX_RECORDS,
            truncate: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the fixed slot capacity
    pub fn max_records(mut self, max_records: u32) -> Self {
        self.config.max_records = max_records;
        self
    }

    /// Keep records from a previous run instead of truncating them away.
    /// The file is still resized to exactly the configured capacity.
    pub fn preserve_existing(mut self) -> Self {
        self.config.truncate = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
