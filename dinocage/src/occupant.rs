//! Occupant (dinosaur) types.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::cage::{CageId, Category};
use crate::error::{Error, Result};

/// Opaque identifier of an occupant, assigned by the store on admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccupantId(i64);

impl OccupantId {
    /// Wraps a raw store identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An occupant waiting to be admitted.
///
/// The category is not part of the request: it is resolved from the
/// species reference at admission time.
///
/// # Examples
///
/// ```
/// use dinocage::NewOccupant;
///
/// let rex = NewOccupant::new("Tyrannosaurus", "Barnie").unwrap();
/// assert_eq!(rex.species(), "tyrannosaurus");
/// assert_eq!(rex.name(), "Barnie");
///
/// assert!(NewOccupant::new("Tyrannosaurus", "   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOccupant {
    species: String,
    name: String,
}

impl NewOccupant {
    /// Creates an admission request.
    ///
    /// The species is trimmed and lower-cased; the name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if either field is empty after trimming.
    pub fn new(species: impl AsRef<str>, name: impl AsRef<str>) -> Result<Self> {
        let species = species.as_ref().trim().to_lowercase();
        if species.is_empty() {
            return Err(Error::Validation {
                field: "species".into(),
                message: "species must be non-empty".into(),
            });
        }

        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name".into(),
                message: "name must be non-empty".into(),
            });
        }

        Ok(Self {
            species,
            name: name.to_string(),
        })
    }

    /// Returns the normalized species name.
    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An admitted occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupant {
    /// Store identifier.
    pub id: OccupantId,
    /// Lower-cased species name.
    pub species: String,
    /// Display name.
    pub name: String,
    /// Category resolved from the species reference.
    pub category: Category,
    /// The cage the occupant was admitted to.
    pub cage: CageId,
    /// When the occupant was admitted.
    #[serde(skip)]
    pub admitted_at: SystemTime,
}

/// Optional filters for listing occupants. All set filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupantFilter {
    /// Only occupants of this category.
    pub category: Option<Category>,
    /// Only occupants of this cage.
    pub cage: Option<CageId>,
    /// Only occupants of this species (matched case-insensitively).
    pub species: Option<String>,
}

impl OccupantFilter {
    /// Restricts the listing to one category.
    #[must_use]
    pub const fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Restricts the listing to one cage.
    #[must_use]
    pub const fn with_cage(mut self, cage: Option<CageId>) -> Self {
        self.cage = cage;
        self
    }

    /// Restricts the listing to one species.
    #[must_use]
    pub fn with_species(mut self, species: Option<String>) -> Self {
        self.species = species.map(|s| s.trim().to_lowercase());
        self
    }
}
