//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `DINOCAGE_*` environment variables that
//! override configuration file values.

use std::env;
use std::path::PathBuf;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Overrides [`Config::default_capacity`].
pub const DEFAULT_CAPACITY_ENV: &str = "DINOCAGE_DEFAULT_CAPACITY";
/// Overrides [`Config::species_file`].
pub const SPECIES_FILE_ENV: &str = "DINOCAGE_SPECIES_FILE";
/// Overrides [`Config::maximum_lock_wait_seconds`].
pub const LOCK_WAIT_ENV: &str = "DINOCAGE_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides [`Config::output_format`].
pub const OUTPUT_FORMAT_ENV: &str = "DINOCAGE_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use dinocage::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric capacity, unknown output format).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(value) = env::var(DEFAULT_CAPACITY_ENV) {
            config.default_capacity = Some(Self::parse_number(DEFAULT_CAPACITY_ENV, &value)?);
        }

        if let Ok(value) = env::var(SPECIES_FILE_ENV) {
            if !value.is_empty() {
                config.species_file = Some(PathBuf::from(value));
            }
        }

        if let Ok(value) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds = Some(Self::parse_number(LOCK_WAIT_ENV, &value)?);
        }

        if let Ok(value) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(Self::parse_format(&value)?);
        }

        Ok(())
    }

    fn parse_number<T: std::str::FromStr>(var: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: var.into(),
            message: "Must be a non-negative integer".into(),
        })
    }

    fn parse_format(value: &str) -> Result<OutputFormat> {
        match value.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message: format!("Unknown output format '{value}'"),
            }),
        }
    }
}
