//! Configuration for the bakery store
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for a bakery instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Driver label the store is registered under
    /// (chai, sqlite, duckdb, pgx or clickhouse)
    pub db_type: String,

    /// Snapshot file. `None` means `{cwd}/bakery-{db_type}.json`.
    pub snapshot_path: Option<PathBuf>,

    /// Buffered slots in the store inbox
    pub store_inbox_capacity: usize,

    // -------------------------------------------------------------------------
    // Actor Configuration
    // -------------------------------------------------------------------------
    /// Ceilings applied to every actor and store call
    pub timeouts: Timeouts,
}

/// The two independent bounded waits of a request/reply call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Max time to wait for the worker to accept the request
    pub enqueue: Duration,

    /// Max time to wait for the reply once accepted
    pub reply: Duration,
}

impl Timeouts {
    /// Same ceiling for both waits
    pub fn uniform(ceiling: Duration) -> Self {
        Self {
            enqueue: ceiling,
            reply: ceiling,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(Duration::from_secs(2))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_type: "sqlite".to_string(),
            snapshot_path: None,
            store_inbox_capacity: 32,
            timeouts: Timeouts::default(),
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
    /// Set the driver label
    pub fn db_type(mut self, db_type: impl Into<String>) -> Self {
        self.config.db_type = db_type.into();
        self
    }

    /// Set the snapshot file path
    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.snapshot_path = Some(path.into());
        self
    }

    /// Set the store inbox capacity
    pub fn store_inbox_capacity(mut self, capacity: usize) -> Self {
        self.config.store_inbox_capacity = capacity;
        self
    }

    /// Set both call ceilings
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.config.timeouts = timeouts;
        self
    }

    /// Set the enqueue ceiling (milliseconds)
    pub fn enqueue_timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeouts.enqueue = Duration::from_millis(ms);
        self
    }

    /// Set the reply ceiling (milliseconds)
    pub fn reply_timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeouts.reply = Duration::from_millis(ms);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
