//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple test modules.

use tempfile::tempdir;

use crate::cage::{CageId, Capacity, Category};
use crate::database::{Database, DatabaseConfig};
use crate::occupant::NewOccupant;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Inserts an empty active cage with the given capacity.
///
/// # Panics
///
/// Panics if the capacity is invalid or the insert fails.
pub fn cage_with_capacity(db: &Database, capacity: i64, category: Category) -> CageId {
    let capacity = Capacity::try_from(capacity).unwrap();
    Database::insert_cage(db.connection(), capacity, category).unwrap()
}

/// Builds a validated occupant request.
///
/// # Panics
///
/// Panics if either field is blank.
#[must_use]
pub fn occupant(species: &str, name: &str) -> NewOccupant {
    NewOccupant::new(species, name).unwrap()
}
