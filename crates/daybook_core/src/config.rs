//! Runtime configuration resolution.
//!
//! Values come from `DAYBOOK_*` environment variables; blank or missing
//! values fall back to defaults under the system temp directory.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "DAYBOOK_DB_PATH";
pub const LOG_DIR_ENV: &str = "DAYBOOK_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "DAYBOOK_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "daybook.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "daybook-logs";

/// Resolved configuration for opening the store and starting logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_dir: read(LOG_DIR_ENV).map_or(defaults.log_dir, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
        }
    }
}
