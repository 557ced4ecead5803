//! Database configuration and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "dinocage.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DINOCAGE_DATA_DIR";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use dinocage::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/dinocage.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long a write waits for the database lock before failing.
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a configuration with a 5000ms busy timeout.
    ///
    /// The file and its parent directory are created on open if missing.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}

/// Returns the default data directory, `~/.dinocage`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".dinocage"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the data directory.
///
/// The resolution order is:
/// 1. `explicit`, if given (the `--data-dir` flag)
/// 2. `$DINOCAGE_DATA_DIR`
/// 3. `~/.dinocage`
///
/// # Errors
///
/// Returns an error if the home directory is needed and cannot be determined.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}
