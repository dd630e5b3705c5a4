//! Runtime configuration read from the environment.
//!
//! # Invariants
//! - Missing variables fall back to defaults; malformed ones are rejected.
//! - `log_level` is always normalized to `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CREATIVEMINDS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "CREATIVEMINDS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CREATIVEMINDS_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "creativeminds.sqlite3";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`{var}` is set but empty")]
    Empty { var: &'static str },
    #[error("`{var}`: {source}")]
    InvalidLogLevel {
        var: &'static str,
        #[source]
        source: LoggingError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `CREATIVEMINDS_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH) {
            config.db_path = non_empty(ENV_DB_PATH, &path)?.into();
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level =
                normalize_level(&level).map_err(|source| ConfigError::InvalidLogLevel {
                    var: ENV_LOG_LEVEL,
                    source,
                })?;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            config.log_dir = Some(non_empty(ENV_LOG_DIR, &dir)?.into());
        }

        Ok(config)
    }
}

fn non_empty<'a>(var: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(trimmed)
}
