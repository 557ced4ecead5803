//! Error types for the dinocage library.
//!
//! Every operation in the library reports failures through [`Error`]. The
//! allocation and lifecycle kinds carry enough context to build a message,
//! and [`Error::kind`] collapses them into a plain [`ErrorKind`] for callers
//! that only need to branch (for example to pick an exit code).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::cage::{CageId, Category};
use crate::occupant::OccupantId;

/// Result type alias for operations that may fail with a dinocage error.
///
/// # Examples
///
/// ```
/// use dinocage::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the dinocage library.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced cage does not exist.
    #[error("cage {cage} not found")]
    CageNotFound {
        /// The cage that was looked up.
        cage: CageId,
    },

    /// The cage has no spare capacity.
    #[error("cage {cage} is full (capacity {capacity})")]
    CageFull {
        /// The full cage.
        cage: CageId,
        /// The cage capacity.
        capacity: u32,
    },

    /// The cage holds a different category than the one requested.
    #[error("cage {cage} holds {actual} occupants, cannot admit {requested}")]
    CageWrongCategory {
        /// The cage that was targeted.
        cage: CageId,
        /// The category the cage was provisioned for.
        actual: Category,
        /// The category of the occupant being admitted.
        requested: Category,
    },

    /// The cage is powered down and cannot accept occupants.
    #[error("cage {cage} is not active")]
    CageNotActive {
        /// The powered-down cage.
        cage: CageId,
    },

    /// The cage still has occupants and cannot be powered down.
    #[error("cage {cage} still holds {occupancy} occupant(s)")]
    CageNotEmpty {
        /// The cage that was targeted.
        cage: CageId,
        /// Its occupancy at the moment of the attempt.
        occupancy: u32,
    },

    /// A cage capacity outside the accepted range was requested.
    #[error("invalid cage capacity {requested}: must be at least 1")]
    InvalidCapacityRequest {
        /// The rejected capacity.
        requested: i64,
    },

    /// A cage status token outside `ACTIVE`/`DOWN` was supplied.
    #[error("invalid cage status '{value}': expected ACTIVE or DOWN")]
    InvalidStatus {
        /// The rejected token.
        value: String,
    },

    /// The species is absent from the species reference.
    #[error("unknown species '{species}'")]
    UnknownSpecies {
        /// The species that was looked up.
        species: String,
    },

    /// The referenced occupant does not exist.
    #[error("occupant {occupant} not found")]
    OccupantNotFound {
        /// The occupant that was looked up.
        occupant: OccupantId,
    },

    /// The underlying store failed or could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// The species reference could not be parsed.
    #[error("species reference error: {0}")]
    SpeciesReference(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The species reference file does not exist.
    #[error("species reference not found: {}", path.display())]
    SpeciesFileNotFound {
        /// The path that was tried.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },

    /// Stored data contradicts the occupancy invariants.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },
}

/// Payload-free classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::CageNotFound`].
    CageNotFound,
    /// See [`Error::CageFull`].
    CageFull,
    /// See [`Error::CageWrongCategory`].
    CageWrongCategory,
    /// See [`Error::CageNotActive`].
    CageNotActive,
    /// See [`Error::CageNotEmpty`].
    CageNotEmpty,
    /// See [`Error::InvalidCapacityRequest`].
    InvalidCapacityRequest,
    /// See [`Error::InvalidStatus`].
    InvalidStatus,
    /// See [`Error::UnknownSpecies`].
    UnknownSpecies,
    /// See [`Error::OccupantNotFound`].
    OccupantNotFound,
    /// See [`Error::StoreUnavailable`].
    StoreUnavailable,
    /// Configuration and species reference problems.
    Configuration,
    /// See [`Error::Io`].
    Io,
    /// See [`Error::Validation`].
    Validation,
    /// Schema version mismatch or corrupted data.
    Corruption,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CageNotFound => "cage-not-found",
            Self::CageFull => "cage-full",
            Self::CageWrongCategory => "cage-wrong-category",
            Self::CageNotActive => "cage-not-active",
            Self::CageNotEmpty => "cage-not-empty",
            Self::InvalidCapacityRequest => "invalid-capacity",
            Self::InvalidStatus => "invalid-status",
            Self::UnknownSpecies => "unknown-species",
            Self::OccupantNotFound => "occupant-not-found",
            Self::StoreUnavailable => "store-unavailable",
            Self::Configuration => "configuration",
            Self::Io => "io",
            Self::Validation => "validation",
            Self::Corruption => "corruption",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Returns the payload-free kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dinocage::{CageId, Error, ErrorKind};
    ///
    /// let err = Error::CageNotActive { cage: CageId::new(3) };
    /// assert_eq!(err.kind(), ErrorKind::CageNotActive);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CageNotFound { .. } => ErrorKind::CageNotFound,
            Self::CageFull { .. } => ErrorKind::CageFull,
            Self::CageWrongCategory { .. } => ErrorKind::CageWrongCategory,
            Self::CageNotActive { .. } => ErrorKind::CageNotActive,
            Self::CageNotEmpty { .. } => ErrorKind::CageNotEmpty,
            Self::InvalidCapacityRequest { .. } => ErrorKind::InvalidCapacityRequest,
            Self::InvalidStatus { .. } => ErrorKind::InvalidStatus,
            Self::UnknownSpecies { .. } => ErrorKind::UnknownSpecies,
            Self::OccupantNotFound { .. } => ErrorKind::OccupantNotFound,
            Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            Self::Configuration(_) | Self::SpeciesReference(_) | Self::SpeciesFileNotFound { .. } => {
                ErrorKind::Configuration
            }
            Self::Io(_) => ErrorKind::Io,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::UnsupportedSchemaVersion { .. } | Self::DatabaseCorruption { .. } => {
                ErrorKind::Corruption
            }
        }
    }

    /// Returns `true` if retrying the same request could succeed.
    ///
    /// Only store failures (lock contention, I/O on the database file) are
    /// transient. Occupancy rejections never change without a new request.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cage_full_error() {
        let err = Error::CageFull {
            cage: CageId::new(1),
            capacity: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("cage 1 is full"));
        assert!(display.contains("capacity 2"));
        assert_eq!(err.kind(), ErrorKind::CageFull);
    }

    #[test]
    fn test_wrong_category_error() {
        let err = Error::CageWrongCategory {
            cage: CageId::new(4),
            actual: Category::Carnivore,
            requested: Category::Herbivore,
        };
        let display = format!("{err}");
        assert!(display.contains("cage 4"));
        assert!(display.contains("carnivore"));
        assert!(display.contains("herbivore"));
    }

    #[test]
    fn test_cage_not_empty_error() {
        let err = Error::CageNotEmpty {
            cage: CageId::new(2),
            occupancy: 3,
        };
        assert!(format!("{err}").contains("3 occupant(s)"));
        assert_eq!(err.kind(), ErrorKind::CageNotEmpty);
    }

    #[test]
    fn test_invalid_status_error() {
        let err = Error::InvalidStatus {
            value: "SLEEPING".to_string(),
        };
        assert!(format!("{err}").contains("SLEEPING"));
        assert_eq!(err.kind(), ErrorKind::InvalidStatus);
    }

    #[test]
    fn test_store_unavailable_is_only_transient_kind() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
        assert!(err.is_transient());

        let err = Error::CageNotFound {
            cage: CageId::new(9),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::CageFull.to_string(), "cage-full");
        assert_eq!(ErrorKind::UnknownSpecies.to_string(), "unknown-species");
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i64> {
            Err(Error::InvalidCapacityRequest { requested: 0 })
        }

        assert!(returns_result().is_err());
    }
}
