//! Cage types: identifiers, capacities, dietary categories and status.
//!
//! A cage is a capacity-bounded container of a single [`Category`]. Its
//! occupancy is only ever changed by the allocator, and its [`CageStatus`]
//! only by the lifecycle guard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque identifier of a cage, assigned by the store at creation.
///
/// # Examples
///
/// ```
/// use dinocage::CageId;
///
/// let id = CageId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CageId(i64);

impl CageId {
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

impl fmt::Display for CageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number of occupants a cage can hold. Always at least 1.
///
/// # Examples
///
/// ```
/// use dinocage::Capacity;
///
/// let capacity = Capacity::try_from(2_i64).unwrap();
/// assert_eq!(capacity.value(), 2);
///
/// assert!(Capacity::try_from(0_i64).is_err());
/// assert!(Capacity::try_from(-5_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Capacity(u32);

impl Capacity {
    /// Capacity given to cages provisioned on demand.
    pub const DEFAULT: Self = Self(20);

    /// Returns the capacity as a plain number.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Capacity {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match u32::try_from(value) {
            Ok(v) if v >= 1 => Ok(Self(v)),
            _ => Err(Error::InvalidCapacityRequest { requested: value }),
        }
    }
}

impl From<Capacity> for u32 {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dietary category shared by a cage and every occupant it holds.
///
/// The external codes are `H` and `C`; the full names are accepted too.
///
/// # Examples
///
/// ```
/// use dinocage::Category;
///
/// assert_eq!("C".parse::<Category>().unwrap(), Category::Carnivore);
/// assert_eq!("herbivore".parse::<Category>().unwrap(), Category::Herbivore);
/// assert_eq!(Category::Herbivore.code(), "H");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Category {
    /// Plant eaters.
    #[serde(rename = "H")]
    #[value(alias = "h")]
    Herbivore,
    /// Meat eaters.
    #[serde(rename = "C")]
    #[value(alias = "c")]
    Carnivore,
}

impl Category {
    /// All categories, in code order.
    pub const ALL: [Self; 2] = [Self::Carnivore, Self::Herbivore];

    /// Returns the single-letter code stored in the database.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Herbivore => "H",
            Self::Carnivore => "C",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Herbivore => write!(f, "herbivore"),
            Self::Carnivore => write!(f, "carnivore"),
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "h" | "herbivore" => Ok(Self::Herbivore),
            "c" | "carnivore" => Ok(Self::Carnivore),
            _ => Err(Error::Validation {
                field: "diet".into(),
                message: format!("unknown diet '{s}', expected H or C"),
            }),
        }
    }
}

/// Operational status of a cage.
///
/// Transitions: `Active -> Down` only while the cage is empty, `Down ->
/// Active` at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CageStatus {
    /// Powered and accepting occupants.
    Active,
    /// Powered down; holds no occupants.
    Down,
}

impl CageStatus {
    /// Returns the token stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Down => "DOWN",
        }
    }
}

impl fmt::Display for CageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CageStatus {
    type Err = Error;

    /// Parses `ACTIVE` or `DOWN`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use dinocage::CageStatus;
    ///
    /// assert_eq!("DOWN".parse::<CageStatus>().unwrap(), CageStatus::Down);
    /// assert_eq!("active".parse::<CageStatus>().unwrap(), CageStatus::Active);
    /// assert!("OFF".parse::<CageStatus>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "DOWN" => Ok(Self::Down),
            _ => Err(Error::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// A snapshot of a cage row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cage {
    /// Store identifier.
    pub id: CageId,
    /// Operational status.
    pub status: CageStatus,
    /// Maximum number of occupants.
    pub capacity: Capacity,
    /// Current number of occupants.
    pub occupancy: u32,
    /// Dietary category of every occupant.
    pub category: Category,
}
