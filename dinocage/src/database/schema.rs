//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions and indices for the cage
//! store. The `CHECK` constraints restate the occupancy invariants so that a
//! buggy statement fails instead of persisting an overfilled or
//! powered-down-but-occupied cage.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the cages table.
///
/// `AUTOINCREMENT` keeps identifiers from being reused.
pub const CREATE_CAGES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS cages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        status TEXT NOT NULL CHECK (status IN ('ACTIVE', 'DOWN')),
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        occupancy INTEGER NOT NULL DEFAULT 0
            CHECK (occupancy >= 0 AND occupancy <= capacity),
        category TEXT NOT NULL CHECK (category IN ('H', 'C')),
        CHECK (status = 'ACTIVE' OR occupancy = 0)
    )";

/// SQL statement to create the dinosaurs table.
pub const CREATE_DINOSAURS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS dinosaurs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        species TEXT NOT NULL,
        name TEXT NOT NULL,
        category TEXT NOT NULL CHECK (category IN ('H', 'C')),
        cage INTEGER NOT NULL REFERENCES cages(id),
        admitted_at INTEGER NOT NULL
    )";

/// Index used by the category scan of the allocator.
pub const CREATE_CAGE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_cages_category_status ON cages(category, status)";

/// Index used by per-cage occupant listings and the occupancy audit.
pub const CREATE_DINOSAUR_CAGE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_dinosaurs_cage ON dinosaurs(cage)";

/// Index used by species-filtered listings.
pub const CREATE_DINOSAUR_SPECIES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_dinosaurs_species ON dinosaurs(species)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
