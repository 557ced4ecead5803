//! Common test utilities for integration tests.
//!
//! This module provides a scratch store shared by the integration tests.
//! Each test gets its own database file; concurrent tests open one
//! connection per thread on that file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dinocage::{
    provision_cage, Cage, CageId, Capacity, Category, Database, DatabaseConfig, NewOccupant,
};
use tempfile::TempDir;

/// A database file in a temporary directory.
pub struct TestStore {
    // Held for its Drop.
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    /// Creates an empty store; the schema is initialized on first open.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dinocage.db");
        let store = Self { _dir: dir, path };
        drop(store.open());
        store
    }

    /// Path to the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a new connection with a generous busy timeout, so contended
    /// writers in tests wait instead of failing.
    pub fn open(&self) -> Database {
        let config = DatabaseConfig::new(&self.path).with_busy_timeout(Duration::from_secs(30));
        Database::open(config).unwrap()
    }

    /// Provisions a cage through the public operation.
    pub fn cage(&self, capacity: i64, category: Category) -> CageId {
        let mut db = self.open();
        provision_cage(&mut db, Capacity::try_from(capacity).unwrap(), category)
            .unwrap()
            .id
    }

    /// Reads a cage back.
    pub fn get(&self, cage: CageId) -> Cage {
        Database::get_cage(self.open().connection(), cage)
            .unwrap()
            .unwrap()
    }
}

/// Builds a validated occupant request.
#[allow(dead_code)]
pub fn occupant(species: &str, name: &str) -> NewOccupant {
    NewOccupant::new(species, name).unwrap()
}
