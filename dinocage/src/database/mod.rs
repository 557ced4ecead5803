//! Database layer for persistent storage of cages and occupants.
//!
//! This module provides a SQLite-based store: connection management,
//! schema versioning, single-statement primitives (including the
//! conditional occupancy updates the allocator is built on), and
//! consistency audits.
//!
//! # Examples
//!
//! ```no_run
//! use dinocage::database::{Database, DatabaseConfig};
//! use dinocage::{Capacity, Category};
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/dinocage.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Create a cage inside a write transaction
//! let tx = db.begin_transaction().unwrap();
//! let id = Database::insert_cage(&tx, Capacity::default(), Category::Carnivore).unwrap();
//! tx.commit().unwrap();
//!
//! // List all cages
//! for cage in Database::list_cages(db.connection(), None, None).unwrap() {
//!     println!("{:?}", cage);
//! }
//! ```

mod audit;
mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;
mod transaction;

// Re-export public API
pub use audit::OccupancyViolation;
pub use config::{
    default_data_dir, resolve_data_dir, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_ENV,
};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
