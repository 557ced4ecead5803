//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands:
//! data directory resolution, configuration loading, database and species
//! reference opening.

use std::path::PathBuf;
use std::time::Duration;

use dinocage::database::{resolve_data_dir, DATABASE_FILE_NAME};
use dinocage::{Config, ConfigBuilder, Database, DatabaseConfig, SpeciesCatalog};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Override the species reference file.
    pub species_file: Option<PathBuf>,
}

/// Resolve the data directory: `--data-dir`, then `DINOCAGE_DATA_DIR`,
/// then `~/.dinocage`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    resolve_data_dir(global.data_dir.as_deref()).map_err(|e| CliError::Config(e.to_string()))
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `{data_dir}/config.yaml`
/// 3. Built-in defaults (lowest priority)
///
/// Global options take precedence over all of these where they overlap,
/// which is applied by the callers below.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let dir = data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// The busy timeout comes from `--busy-timeout` if given, else from the
/// configured `maximum_lock_wait_seconds`.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE_NAME);

    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |secs| Duration::from_secs(secs.into()));

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(busy_timeout);
    Database::open(db_config).map_err(CliError::from)
}

/// Load the species reference: `--species-file`, then the configured file,
/// then `{data_dir}/species.json`, then the built-in list.
pub fn load_species(global: &GlobalOptions, config: &Config) -> Result<SpeciesCatalog, CliError> {
    let explicit = global
        .species_file
        .as_deref()
        .or(config.species_file.as_deref());

    SpeciesCatalog::discover(explicit, &data_dir(global)?).map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
