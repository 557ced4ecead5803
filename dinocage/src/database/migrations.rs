//! Database schema management.
//!
//! This module handles database schema initialization and version checking.
//! There is a single schema version so far; a database written by another
//! version is refused rather than migrated.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_CAGES_TABLE, CREATE_CAGE_CATEGORY_INDEX, CREATE_DINOSAURS_TABLE,
    CREATE_DINOSAUR_CAGE_INDEX, CREATE_DINOSAUR_SPECIES_INDEX, CREATE_METADATA_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Every statement is idempotent, so two processes racing to initialize the
/// same fresh database end up with the same schema.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use dinocage::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    conn.execute(CREATE_CAGES_TABLE, [])?;
    conn.execute(CREATE_DINOSAURS_TABLE, [])?;

    conn.execute(CREATE_CAGE_CATEGORY_INDEX, [])?;
    conn.execute(CREATE_DINOSAUR_CAGE_INDEX, [])?;
    conn.execute(CREATE_DINOSAUR_SPECIES_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than
/// "no rows returned" (which indicates version 0).
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            // "no such table" surfaces as a generic SQLITE_ERROR
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// - version 0: the schema is created
/// - current version: nothing to do
/// - any other version: [`Error::UnsupportedSchemaVersion`]
///
/// # Errors
///
/// Returns an error if the schema version is incompatible, or if
/// initialization or the version query fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
        log::debug!("initialized schema version {CURRENT_SCHEMA_VERSION}");
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION.unsigned_abs(),
            found: version.unsigned_abs(),
        });
    }

    Ok(())
}
