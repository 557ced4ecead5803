//! Write operations on the cage store.
//!
//! Every operation here opens its own `IMMEDIATE` transaction, drives the
//! [`Allocator`](crate::allocator::Allocator) or [`LifecycleGuard`] inside
//! it, and commits only when every step succeeded.
//!
//! # Examples
//!
//! ```no_run
//! use dinocage::database::{Database, DatabaseConfig};
//! use dinocage::operations::{provision_cage, set_cage_status, AdmissionService};
//! use dinocage::{CageStatus, Capacity, Category, NewOccupant, SpeciesCatalog};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
//! let species = SpeciesCatalog::builtin();
//!
//! let cage = provision_cage(&mut db, Capacity::try_from(2_i64).unwrap(), Category::Herbivore).unwrap();
//!
//! let leaf = NewOccupant::new("stegosaurus", "Leaf").unwrap();
//! let admitted = AdmissionService::new(&mut db, &species)
//!     .admit_to_cage(&leaf, cage.id)
//!     .unwrap();
//!
//! // Occupied, so this fails with CageNotEmpty.
//! assert!(set_cage_status(&mut db, cage.id, CageStatus::Down).is_err());
//! # let _ = admitted;
//! ```

pub mod admission;
pub mod lifecycle;
pub mod provision;
pub mod release;
pub mod verify;

pub use admission::AdmissionService;
pub use lifecycle::{set_cage_status, LifecycleGuard};
pub use provision::provision_cage;
pub use release::release_occupant;
pub use verify::{verify_database, VerifyReport};
