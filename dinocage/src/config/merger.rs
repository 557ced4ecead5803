//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use dinocage::config::{Config, ConfigMerger};
///
/// let low = Config { default_capacity: Some(10), ..Default::default() };
/// let high = Config { default_capacity: Some(4), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.default_capacity, Some(4));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target. Fields set in `source` win.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.default_capacity.is_some() {
            target.default_capacity = source.default_capacity;
        }

        if source.species_file.is_some() {
            target.species_file.clone_from(&source.species_file);
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
