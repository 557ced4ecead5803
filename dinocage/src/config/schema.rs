//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cage::Capacity;
use crate::error::Result;

/// Lock wait used when none is configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial sources can be layered; the
/// accessors fill in defaults.
///
/// # Examples
///
/// ```
/// use dinocage::config::Config;
///
/// let config = Config {
///     default_capacity: Some(12),
///     ..Default::default()
/// };
/// assert_eq!(config.cage_capacity().unwrap().value(), 12);
/// assert_eq!(Config::default().cage_capacity().unwrap().value(), 20);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Capacity of cages provisioned on demand.
    pub default_capacity: Option<u32>,

    /// Species reference file (JSON).
    pub species_file: Option<PathBuf>,

    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the capacity for cages provisioned on demand.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCapacityRequest`] if the configured
    /// value is zero.
    pub fn cage_capacity(&self) -> Result<Capacity> {
        self.default_capacity
            .map_or(Ok(Capacity::DEFAULT), |c| Capacity::try_from(i64::from(c)))
    }

    /// Returns how long a write waits for the database lock.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Returns the configured output format, or the default.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for listings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns for terminals.
    #[default]
    Table,
    /// A JSON array.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}
