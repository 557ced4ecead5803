//! Cage status transitions.
//!
//! A cage may be powered down only while it is empty; powering it back up
//! is always allowed. Both are single conditional updates, so a concurrent
//! admission and a power-down on the same cage can never both succeed.

use rusqlite::Connection;

use crate::cage::{Cage, CageId, CageStatus};
use crate::database::Database;
use crate::error::{Error, Result};

/// Applies status transitions on one connection or transaction.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleGuard<'a> {
    conn: &'a Connection,
}

impl<'a> LifecycleGuard<'a> {
    /// Creates a guard bound to `conn`.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Moves `cage` to `status` and returns the updated cage.
    ///
    /// Setting the status a cage already has succeeds without change.
    ///
    /// # Errors
    ///
    /// - [`Error::CageNotFound`] if the cage does not exist
    /// - [`Error::CageNotEmpty`] if moving to [`CageStatus::Down`] while
    ///   occupants remain
    pub fn set_status(&self, cage: CageId, status: CageStatus) -> Result<Cage> {
        let updated = Database::update_cage_status(self.conn, cage, status)?;
        let current =
            Database::get_cage(self.conn, cage)?.ok_or(Error::CageNotFound { cage })?;

        if !updated {
            return Err(Error::CageNotEmpty {
                cage,
                occupancy: current.occupancy,
            });
        }

        log::debug!("cage {cage} is now {status}");
        Ok(current)
    }
}

/// Runs [`LifecycleGuard::set_status`] in its own write transaction.
///
/// # Errors
///
/// See [`LifecycleGuard::set_status`]. Returns [`Error::StoreUnavailable`]
/// if the write lock cannot be acquired.
///
/// # Examples
///
/// ```no_run
/// use dinocage::database::{Database, DatabaseConfig};
/// use dinocage::operations::set_cage_status;
/// use dinocage::{CageId, CageStatus};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
/// let cage = set_cage_status(&mut db, CageId::new(1), CageStatus::Down).unwrap();
/// assert_eq!(cage.status, CageStatus::Down);
/// ```
pub fn set_cage_status(db: &mut Database, cage: CageId, status: CageStatus) -> Result<Cage> {
    let tx = db.begin_transaction()?;
    let updated = LifecycleGuard::new(&tx).set_status(cage, status)?;
    tx.commit()?;

    log::info!("set cage {cage} to {status}");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cage::Category;
    use crate::database::test_util::{cage_with_capacity, create_test_database};

    #[test]
    fn test_power_down_empty_cage() {
        let mut db = create_test_database();
        let cage = cage_with_capacity(&db, 2, Category::Herbivore);

        let updated = set_cage_status(&mut db, cage, CageStatus::Down).unwrap();
        assert_eq!(updated.status, CageStatus::Down);
    }

    #[test]
    fn test_power_down_occupied_cage() {
        let mut db = create_test_database();
        let cage = cage_with_capacity(&db, 2, Category::Herbivore);
        Database::reserve_in_cage(db.connection(), cage, Category::Herbivore).unwrap();

        let err = set_cage_status(&mut db, cage, CageStatus::Down).unwrap_err();
        assert!(matches!(err, Error::CageNotEmpty { occupancy: 1, .. }));

        let stored = Database::get_cage(db.connection(), cage).unwrap().unwrap();
        assert_eq!(stored.status, CageStatus::Active);
    }

    #[test]
    fn test_power_up_is_unconditional() {
        let mut db = create_test_database();
        let cage = cage_with_capacity(&db, 2, Category::Carnivore);
        set_cage_status(&mut db, cage, CageStatus::Down).unwrap();

        let updated = set_cage_status(&mut db, cage, CageStatus::Active).unwrap();
        assert_eq!(updated.status, CageStatus::Active);
    }

    #[test]
    fn test_same_status_is_noop_success() {
        let mut db = create_test_database();
        let cage = cage_with_capacity(&db, 2, Category::Carnivore);

        set_cage_status(&mut db, cage, CageStatus::Active).unwrap();
        set_cage_status(&mut db, cage, CageStatus::Down).unwrap();
        set_cage_status(&mut db, cage, CageStatus::Down).unwrap();
    }

    #[test]
    fn test_missing_cage() {
        let mut db = create_test_database();

        for status in [CageStatus::Active, CageStatus::Down] {
            let err = set_cage_status(&mut db, CageId::new(3), status).unwrap_err();
            assert!(matches!(err, Error::CageNotFound { .. }));
        }
    }
}
