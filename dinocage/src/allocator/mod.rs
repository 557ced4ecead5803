//! Cage allocation with atomic slot reservation.
//!
//! The allocator finds a cage with spare capacity for a category, or
//! provisions a new one, and takes one occupancy slot in it. Every
//! eligibility check is folded into the `WHERE` clause of a single
//! conditional update, so there is no window between "looks free" and
//! "taken" for another writer to slip into.
//!
//! The allocator never opens transactions itself. Callers hand it the
//! transaction they are running in (a [`rusqlite::Transaction`] derefs to
//! a [`Connection`]); with an `IMMEDIATE` transaction, find-or-create is
//! serialized against every other writer on the same database.

use rusqlite::Connection;

use crate::cage::{CageId, CageStatus, Capacity, Category};
use crate::database::Database;
use crate::error::{Error, Result};

#[cfg(test)]
mod proptests;

/// Stateless cage allocator bound to one connection or transaction.
///
/// # Examples
///
/// ```no_run
/// use dinocage::allocator::Allocator;
/// use dinocage::database::{Database, DatabaseConfig};
/// use dinocage::Category;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
/// let tx = db.begin_transaction().unwrap();
///
/// let allocator = Allocator::new(&tx);
/// let cage = allocator.reserve_slot(Category::Carnivore, None).unwrap();
/// tx.commit().unwrap();
/// println!("reserved a slot in cage {cage}");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Allocator<'a> {
    conn: &'a Connection,
    default_capacity: Capacity,
}

impl<'a> Allocator<'a> {
    /// Creates an allocator that provisions cages of [`Capacity::DEFAULT`]
    /// when no eligible cage exists.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            default_capacity: Capacity::DEFAULT,
        }
    }

    /// Sets the capacity of cages provisioned on demand.
    #[must_use]
    pub const fn with_default_capacity(mut self, capacity: Capacity) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Reserves one occupancy slot for an occupant of `category`.
    ///
    /// With a `target`, the slot is taken in that cage or the call fails.
    /// Without one, the lowest-id active cage of the category with spare
    /// capacity is used, and a new cage of the default capacity is
    /// provisioned when there is none.
    ///
    /// # Errors
    ///
    /// For a targeted reservation that cannot be satisfied, the first
    /// matching reason in this order:
    /// - [`Error::CageNotFound`]
    /// - [`Error::CageNotActive`]
    /// - [`Error::CageWrongCategory`]
    /// - [`Error::CageFull`]
    ///
    /// Returns [`Error::StoreUnavailable`] if the store fails.
    pub fn reserve_slot(&self, category: Category, target: Option<CageId>) -> Result<CageId> {
        match target {
            Some(cage) => self.reserve_in(cage, category),
            None => self.reserve_any(category),
        }
    }

    fn reserve_in(&self, cage: CageId, category: Category) -> Result<CageId> {
        if Database::reserve_in_cage(self.conn, cage, category)? {
            log::debug!("reserved slot in cage {cage} for {category}");
            return Ok(cage);
        }
        Err(self.diagnose(cage, category)?)
    }

    fn reserve_any(&self, category: Category) -> Result<CageId> {
        if let Some(cage) = Database::reserve_first_free(self.conn, category)? {
            log::debug!("reserved slot in cage {cage} for {category}");
            return Ok(cage);
        }

        let cage = self.provision_cage(self.default_capacity, category)?;
        self.reserve_in(cage, category)
    }

    /// Works out why a targeted reservation matched no row.
    fn diagnose(&self, cage: CageId, category: Category) -> Result<Error> {
        let Some(current) = Database::get_cage(self.conn, cage)? else {
            return Ok(Error::CageNotFound { cage });
        };

        let err = if current.status != CageStatus::Active {
            Error::CageNotActive { cage }
        } else if current.category != category {
            Error::CageWrongCategory {
                cage,
                actual: current.category,
                requested: category,
            }
        } else {
            // Either genuinely full, or a writer outside any transaction
            // freed a slot after our update missed.
            Error::CageFull {
                cage,
                capacity: current.capacity.value(),
            }
        };
        Ok(err)
    }

    /// Creates an empty, active cage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the insert fails.
    pub fn provision_cage(&self, capacity: Capacity, category: Category) -> Result<CageId> {
        let cage = Database::insert_cage(self.conn, capacity, category)?;
        log::info!("provisioned {category} cage {cage} with capacity {capacity}");
        Ok(cage)
    }

    /// Gives back one occupancy slot of `cage`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the cage occupancy is
    /// already zero (or the cage is missing), since that means its counter
    /// disagrees with the occupants bound to it.
    pub fn release_slot(&self, cage: CageId) -> Result<()> {
        if Database::release_in_cage(self.conn, cage)? {
            log::debug!("released slot in cage {cage}");
            return Ok(());
        }
        Err(Error::DatabaseCorruption {
            details: format!("cage {cage} has no occupied slot to release"),
        })
    }
}
