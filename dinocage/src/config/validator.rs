//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use dinocage::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let zero = Config { default_capacity: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&zero).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a zero capacity, a zero lock wait,
    /// or an empty species file path.
    pub fn validate(config: &Config) -> Result<()> {
        if config.default_capacity == Some(0) {
            return Err(Error::Validation {
                field: "default_capacity".into(),
                message: "Capacity must be greater than 0".into(),
            });
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        if let Some(ref path) = config.species_file {
            if path.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "species_file".into(),
                    message: "Path must not be empty".into(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_empty_config() {
        ConfigValidator::validate(&Config::default()).unwrap();
    }

    #[test]
    fn test_validate_full_config() {
        let config = Config {
            default_capacity: Some(2),
            species_file: Some(PathBuf::from("species.json")),
            maximum_lock_wait_seconds: Some(1),
            output_format: None,
        };
        ConfigValidator::validate(&config).unwrap();
    }

    #[test]
    fn test_validate_zero_lock_wait() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Default::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(
            matches!(err, Error::Validation { ref field, .. } if field == "maximum_lock_wait_seconds")
        );
    }

    #[test]
    fn test_validate_empty_species_path() {
        let config = Config {
            species_file: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
