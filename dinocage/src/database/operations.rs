//! Store primitives for cages and occupants.
//!
//! Everything here is a single SQL statement taking a `&Connection`, so it
//! composes inside whatever transaction the caller holds. The conditional
//! updates report success through the affected row count; deciding what a
//! miss means is left to the allocator and lifecycle guard.

use std::time::{Duration, SystemTime};

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::cage::{Cage, CageId, CageStatus, Capacity, Category};
use crate::error::{Error, Result};
use crate::occupant::{NewOccupant, Occupant, OccupantFilter, OccupantId};

use super::connection::Database;

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn conversion_error(column: usize, err: Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// Deserializes a cage row.
///
/// Expects row fields in this order: id, status, capacity, occupancy, category
pub(super) fn row_to_cage(row: &rusqlite::Row<'_>) -> rusqlite::Result<Cage> {
    let id: i64 = row.get(0)?;
    let status: String = row.get(1)?;
    let capacity: i64 = row.get(2)?;
    let occupancy: u32 = row.get(3)?;
    let category: String = row.get(4)?;

    Ok(Cage {
        id: CageId::new(id),
        status: status.parse().map_err(|e| conversion_error(1, e))?,
        capacity: Capacity::try_from(capacity).map_err(|e| conversion_error(2, e))?,
        occupancy,
        category: category.parse().map_err(|e| conversion_error(4, e))?,
    })
}

/// Deserializes an occupant row.
///
/// Expects row fields in this order: id, species, name, category, cage, `admitted_at`
fn row_to_occupant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Occupant> {
    let id: i64 = row.get(0)?;
    let category: String = row.get(3)?;
    let cage: i64 = row.get(4)?;
    let admitted_secs: i64 = row.get(5)?;

    Ok(Occupant {
        id: OccupantId::new(id),
        species: row.get(1)?,
        name: row.get(2)?,
        category: category.parse().map_err(|e| conversion_error(3, e))?,
        cage: CageId::new(cage),
        admitted_at: unix_secs_to_systemtime(admitted_secs),
    })
}

const INSERT_CAGE: &str = r"
    INSERT INTO cages (status, capacity, occupancy, category)
    VALUES ('ACTIVE', ?1, 0, ?2)
    RETURNING id
";

const SELECT_CAGE: &str = r"
    SELECT id, status, capacity, occupancy, category
    FROM cages
    WHERE id = ?1
";

const LIST_CAGES: &str = r"
    SELECT id, status, capacity, occupancy, category
    FROM cages
    WHERE (?1 IS NULL OR status = ?1)
      AND (?2 IS NULL OR category = ?2)
    ORDER BY id
";

// Reserve in a named cage: the whole eligibility check is the WHERE clause.
const RESERVE_IN_CAGE: &str = r"
    UPDATE cages
    SET occupancy = occupancy + 1
    WHERE id = ?1
      AND status = 'ACTIVE'
      AND category = ?2
      AND occupancy < capacity
";

// Reserve in the lowest-id eligible cage of a category.
const RESERVE_FIRST_FREE: &str = r"
    UPDATE cages
    SET occupancy = occupancy + 1
    WHERE id = (
        SELECT id FROM cages
        WHERE status = 'ACTIVE'
          AND category = ?1
          AND occupancy < capacity
        ORDER BY id
        LIMIT 1
    )
      AND occupancy < capacity
    RETURNING id
";

const RELEASE_IN_CAGE: &str = r"
    UPDATE cages
    SET occupancy = occupancy - 1
    WHERE id = ?1
      AND occupancy > 0
";

const SET_STATUS_ACTIVE: &str = r"
    UPDATE cages
    SET status = 'ACTIVE'
    WHERE id = ?1
";

const SET_STATUS_DOWN: &str = r"
    UPDATE cages
    SET status = 'DOWN'
    WHERE id = ?1
      AND occupancy = 0
";

const INSERT_OCCUPANT: &str = r"
    INSERT INTO dinosaurs (species, name, category, cage, admitted_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    RETURNING id
";

const SELECT_OCCUPANT: &str = r"
    SELECT id, species, name, category, cage, admitted_at
    FROM dinosaurs
    WHERE id = ?1
";

const DELETE_OCCUPANT: &str = r"
    DELETE FROM dinosaurs
    WHERE id = ?1
    RETURNING id, species, name, category, cage, admitted_at
";

const LIST_OCCUPANTS: &str = r"
    SELECT id, species, name, category, cage, admitted_at
    FROM dinosaurs
    WHERE (?1 IS NULL OR category = ?1)
      AND (?2 IS NULL OR cage = ?2)
      AND (?3 IS NULL OR species = ?3)
    ORDER BY id
";

impl Database {
    /// Inserts an empty, active cage and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_cage(conn: &Connection, capacity: Capacity, category: Category) -> Result<CageId> {
        let id: i64 = conn.query_row(
            INSERT_CAGE,
            params![capacity.value(), category.code()],
            |row| row.get(0),
        )?;
        Ok(CageId::new(id))
    }

    /// Retrieves a cage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dinocage::database::{Database, DatabaseConfig};
    /// use dinocage::CageId;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
    /// let cage = Database::get_cage(db.connection(), CageId::new(1)).unwrap();
    /// ```
    pub fn get_cage(conn: &Connection, id: CageId) -> Result<Option<Cage>> {
        Ok(conn
            .query_row(SELECT_CAGE, [id.value()], row_to_cage)
            .optional()?)
    }

    /// Lists cages in id order, optionally filtered by status and category.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_cages(
        conn: &Connection,
        status: Option<CageStatus>,
        category: Option<Category>,
    ) -> Result<Vec<Cage>> {
        let mut stmt = conn.prepare(LIST_CAGES)?;
        let cages = stmt
            .query_map(
                params![status.map(CageStatus::as_str), category.map(Category::code)],
                row_to_cage,
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(cages)
    }

    /// Increments the occupancy of `cage` if it is active, of `category`
    /// and not full, as one conditional update.
    ///
    /// Returns `true` if the slot was taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn reserve_in_cage(conn: &Connection, cage: CageId, category: Category) -> Result<bool> {
        let rows = conn.execute(RESERVE_IN_CAGE, params![cage.value(), category.code()])?;
        Ok(rows == 1)
    }

    /// Increments the occupancy of the lowest-id active, non-full cage of
    /// `category`, as one conditional update.
    ///
    /// Returns the cage that received the slot, or `None` if no cage was
    /// eligible.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn reserve_first_free(conn: &Connection, category: Category) -> Result<Option<CageId>> {
        let id: Option<i64> = conn
            .query_row(RESERVE_FIRST_FREE, [category.code()], |row| row.get(0))
            .optional()?;
        Ok(id.map(CageId::new))
    }

    /// Decrements the occupancy of `cage` if it is positive.
    ///
    /// Returns `true` if a slot was released.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn release_in_cage(conn: &Connection, cage: CageId) -> Result<bool> {
        let rows = conn.execute(RELEASE_IN_CAGE, [cage.value()])?;
        Ok(rows == 1)
    }

    /// Sets the status of `cage`. Moving to [`CageStatus::Down`] only
    /// matches an empty cage.
    ///
    /// Returns `true` if the row was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_cage_status(conn: &Connection, cage: CageId, status: CageStatus) -> Result<bool> {
        let sql = match status {
            CageStatus::Active => SET_STATUS_ACTIVE,
            CageStatus::Down => SET_STATUS_DOWN,
        };
        let rows = conn.execute(sql, [cage.value()])?;
        Ok(rows == 1)
    }

    /// Inserts an occupant bound to `cage`.
    ///
    /// This does not touch the cage occupancy; callers pair it with a
    /// reservation in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_occupant(
        conn: &Connection,
        occupant: &NewOccupant,
        category: Category,
        cage: CageId,
    ) -> Result<Occupant> {
        let admitted_at = SystemTime::now();
        let admitted_secs = systemtime_to_unix_secs(admitted_at)?;
        let id: i64 = conn.query_row(
            INSERT_OCCUPANT,
            params![
                occupant.species(),
                occupant.name(),
                category.code(),
                cage.value(),
                admitted_secs,
            ],
            |row| row.get(0),
        )?;

        Ok(Occupant {
            id: OccupantId::new(id),
            species: occupant.species().to_string(),
            name: occupant.name().to_string(),
            category,
            cage,
            admitted_at: unix_secs_to_systemtime(admitted_secs),
        })
    }

    /// Retrieves an occupant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    pub fn get_occupant(conn: &Connection, id: OccupantId) -> Result<Option<Occupant>> {
        Ok(conn
            .query_row(SELECT_OCCUPANT, [id.value()], row_to_occupant)
            .optional()?)
    }

    /// Deletes an occupant and returns the removed row.
    ///
    /// This does not touch the cage occupancy; callers pair it with a
    /// release in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_occupant(conn: &Connection, id: OccupantId) -> Result<Option<Occupant>> {
        Ok(conn
            .query_row(DELETE_OCCUPANT, [id.value()], row_to_occupant)
            .optional()?)
    }

    /// Lists occupants in id order, applying every filter that is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dinocage::database::{Database, DatabaseConfig};
    /// use dinocage::{Category, OccupantFilter};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
    /// let filter = OccupantFilter::default().with_category(Some(Category::Carnivore));
    /// let carnivores = Database::list_occupants(db.connection(), &filter).unwrap();
    /// ```
    pub fn list_occupants(conn: &Connection, filter: &OccupantFilter) -> Result<Vec<Occupant>> {
        let mut stmt = conn.prepare(LIST_OCCUPANTS)?;
        let occupants = stmt
            .query_map(
                params![
                    filter.category.map(Category::code),
                    filter.cage.map(CageId::value),
                    filter.species.as_deref(),
                ],
                row_to_occupant,
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(occupants)
    }
}
