#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # dinocage
//!
//! A library for capacity-bounded cage allocation.
//!
//! Cages have a fixed capacity and a dietary [`Category`]; occupants are
//! admitted into a cage of their category without ever exceeding its
//! capacity, and a cage can only be powered down while it is empty. State
//! lives in a SQLite database that several processes may share.
//!
//! ## Core Types
//!
//! - [`Cage`], [`CageId`], [`Capacity`], [`Category`] and [`CageStatus`]
//! - [`NewOccupant`], [`Occupant`] and [`OccupantFilter`]
//! - [`SpeciesCatalog`]: the species → category reference
//! - [`Allocator`]: slot reservation on an open transaction
//! - [`AdmissionService`], [`provision_cage`] and [`set_cage_status`]: the
//!   transactional write operations
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use dinocage::{AdmissionService, Database, DatabaseConfig, NewOccupant, SpeciesCatalog};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
//! let species = SpeciesCatalog::builtin();
//!
//! let rex = NewOccupant::new("tyrannosaurus", "Barnie").unwrap();
//! let admitted = AdmissionService::new(&mut db, &species)
//!     .admit_to_any_cage(&rex)
//!     .unwrap();
//! println!("{} went to cage {}", admitted.name, admitted.cage);
//! ```

pub mod allocator;
pub mod cage;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod occupant;
pub mod operations;
pub mod species;

// Re-export key types at crate root for convenience
pub use allocator::Allocator;
pub use cage::{Cage, CageId, CageStatus, Capacity, Category};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{Database, DatabaseConfig, OccupancyViolation};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use occupant::{NewOccupant, Occupant, OccupantFilter, OccupantId};
pub use operations::{
    provision_cage, release_occupant, set_cage_status, verify_database, AdmissionService,
    LifecycleGuard, VerifyReport,
};
pub use species::{SpeciesCatalog, SpeciesEntry};
