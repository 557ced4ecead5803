//! Consistency queries over the committed state.
//!
//! The allocator keeps each cage's `occupancy` counter in step with the
//! rows of `dinosaurs`. These queries look for any place where the two
//! disagree, or where a cage holds something it should not.

use rusqlite::Connection;
use serde::Serialize;

use crate::cage::{CageId, Category};
use crate::error::Result;
use crate::occupant::OccupantId;

use super::connection::Database;

/// One inconsistency found by [`Database::audit_occupancy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "kebab-case")]
pub enum OccupancyViolation {
    /// The stored counter differs from the number of occupant rows.
    CountMismatch {
        /// The affected cage.
        cage: CageId,
        /// Stored `occupancy` counter.
        recorded: u32,
        /// Number of occupants bound to the cage.
        actual: u32,
    },
    /// More occupants than the cage capacity.
    OverCapacity {
        /// The affected cage.
        cage: CageId,
        /// Cage capacity.
        capacity: u32,
        /// Number of occupants bound to the cage.
        actual: u32,
    },
    /// A powered-down cage that still holds occupants.
    OccupiedWhileDown {
        /// The affected cage.
        cage: CageId,
        /// Number of occupants bound to the cage.
        actual: u32,
    },
    /// An occupant whose category differs from its cage's.
    CategoryMismatch {
        /// The misplaced occupant.
        occupant: OccupantId,
        /// The occupant's cage.
        cage: CageId,
        /// The occupant's category.
        occupant_category: Category,
        /// The cage's category.
        cage_category: Category,
    },
}

const CAGE_COUNTS: &str = r"
    SELECT c.id, c.status, c.capacity, c.occupancy, COUNT(d.id)
    FROM cages c
    LEFT JOIN dinosaurs d ON d.cage = c.id
    GROUP BY c.id
    ORDER BY c.id
";

const CATEGORY_MISMATCHES: &str = r"
    SELECT d.id, d.cage, d.category, c.category
    FROM dinosaurs d
    JOIN cages c ON c.id = d.cage
    WHERE d.category <> c.category
    ORDER BY d.id
";

impl Database {
    /// Checks every cage against its occupants.
    ///
    /// Returns an empty list when the store is consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be decoded.
    pub fn audit_occupancy(conn: &Connection) -> Result<Vec<OccupancyViolation>> {
        let mut violations = Vec::new();

        let mut stmt = conn.prepare(CAGE_COUNTS)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let cage = CageId::new(row.get(0)?);
            let status: String = row.get(1)?;
            let capacity: u32 = row.get(2)?;
            let recorded: u32 = row.get(3)?;
            let actual: u32 = row.get(4)?;

            if recorded != actual {
                violations.push(OccupancyViolation::CountMismatch {
                    cage,
                    recorded,
                    actual,
                });
            }
            if actual > capacity {
                violations.push(OccupancyViolation::OverCapacity {
                    cage,
                    capacity,
                    actual,
                });
            }
            if status != "ACTIVE" && actual > 0 {
                violations.push(OccupancyViolation::OccupiedWhileDown { cage, actual });
            }
        }

        let mut stmt = conn.prepare(CATEGORY_MISMATCHES)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let occupant_category: String = row.get(2)?;
            let cage_category: String = row.get(3)?;
            violations.push(OccupancyViolation::CategoryMismatch {
                occupant: OccupantId::new(row.get(0)?),
                cage: CageId::new(row.get(1)?),
                occupant_category: occupant_category.parse()?,
                cage_category: cage_category.parse()?,
            });
        }

        Ok(violations)
    }

    /// Runs `PRAGMA integrity_check` and returns the problems it reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the pragma cannot be executed.
    pub fn verify_integrity(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare("PRAGMA integrity_check")?;
        let messages = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(messages.into_iter().filter(|m| m != "ok").collect())
    }
}
