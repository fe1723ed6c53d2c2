//! Storage configuration read from the environment.

use std::path::Path;

const DEFAULT_DB_FILE: &str = "lendpool.db";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 30_000;

/// Connection settings for the SQLite ledger database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub db_path: String,
    pub pool_max_size: u32,
    pub busy_timeout_ms: u64,
}

impl StorageConfig {
    /// Defaults for a database file inside `data_dir`.
    pub fn new(data_dir: &str) -> Self {
        Self {
            db_path: Path::new(data_dir)
                .join(DEFAULT_DB_FILE)
                .to_string_lossy()
                .into_owned(),
            pool_max_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Reads `LENDPOOL_DB_PATH` (falling back to `DATABASE_URL`),
    /// `LENDPOOL_DB_POOL_SIZE` and `LENDPOOL_DB_BUSY_TIMEOUT_MS`.
    pub fn from_env(data_dir: &str) -> Self {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    fn from_lookup<F>(data_dir: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(data_dir);
        if let Some(path) = lookup("LENDPOOL_DB_PATH").or_else(|| lookup("DATABASE_URL")) {
            config.db_path = path;
        }
        if let Some(size) = lookup("LENDPOOL_DB_POOL_SIZE").and_then(|v| v.parse().ok()) {
            config.pool_max_size = size;
        }
        if let Some(timeout) = lookup("LENDPOOL_DB_BUSY_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            config.busy_timeout_ms = timeout;
        }
        config
    }
}
