//! Store verification: SQLite integrity plus the occupancy audit.

use serde::Serialize;

use crate::database::{Database, OccupancyViolation};
use crate::error::Result;

/// Outcome of [`verify_database`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Problems reported by `PRAGMA integrity_check`.
    pub integrity: Vec<String>,
    /// Occupancy inconsistencies.
    pub violations: Vec<OccupancyViolation>,
}

impl VerifyReport {
    /// Returns `true` if nothing was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.integrity.is_empty() && self.violations.is_empty()
    }
}

/// Checks the database file and audits occupancy against occupant rows.
///
/// Both checks read one snapshot of the store.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn verify_database(db: &Database) -> Result<VerifyReport> {
    let tx = db.connection().unchecked_transaction()?;
    let report = VerifyReport {
        integrity: Database::verify_integrity(&tx)?,
        violations: Database::audit_occupancy(&tx)?,
    };
    tx.rollback()?;

    if !report.is_clean() {
        log::warn!(
            "verification found {} integrity problem(s) and {} occupancy violation(s)",
            report.integrity.len(),
            report.violations.len()
        );
    }
    Ok(report)
}
