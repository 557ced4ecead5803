//! Releasing occupants.
//!
//! Release needs no species lookup, so it works with whatever species
//! reference is (or is not) configured.

use crate::allocator::Allocator;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::occupant::{Occupant, OccupantId};

/// Removes an occupant and frees its slot in one write transaction.
///
/// The occupant row is deleted and its cage's occupancy decremented
/// together; on any error neither change is kept.
///
/// # Errors
///
/// Returns [`Error::OccupantNotFound`] if there is no such occupant,
/// [`Error::DatabaseCorruption`] if its cage has no slot to give back, or
/// [`Error::StoreUnavailable`] if the store fails.
///
/// # Examples
///
/// ```no_run
/// use dinocage::database::{Database, DatabaseConfig};
/// use dinocage::operations::release_occupant;
/// use dinocage::OccupantId;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
/// let released = release_occupant(&mut db, OccupantId::new(1)).unwrap();
/// println!("cage {} has a free slot", released.cage);
/// ```
pub fn release_occupant(db: &mut Database, id: OccupantId) -> Result<Occupant> {
    let tx = db.begin_transaction()?;
    let released =
        Database::delete_occupant(&tx, id)?.ok_or(Error::OccupantNotFound { occupant: id })?;
    Allocator::new(&tx).release_slot(released.cage)?;
    tx.commit()?;

    log::info!("released occupant {id} from cage {}", released.cage);
    Ok(released)
}
