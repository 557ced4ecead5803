//! Explicit cage provisioning.

use crate::allocator::Allocator;
use crate::cage::{Cage, Capacity, Category};
use crate::database::Database;
use crate::error::{Error, Result};

/// Creates an empty, active cage in its own write transaction.
///
/// # Errors
///
/// Returns [`Error::StoreUnavailable`] if the write lock cannot be
/// acquired or the insert fails.
///
/// # Examples
///
/// ```no_run
/// use dinocage::database::{Database, DatabaseConfig};
/// use dinocage::operations::provision_cage;
/// use dinocage::{Capacity, Category};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
/// let cage = provision_cage(&mut db, Capacity::try_from(2_i64).unwrap(), Category::Herbivore).unwrap();
/// assert_eq!(cage.occupancy, 0);
/// ```
pub fn provision_cage(db: &mut Database, capacity: Capacity, category: Category) -> Result<Cage> {
    let tx = db.begin_transaction()?;
    let id = Allocator::new(&tx).provision_cage(capacity, category)?;
    let cage = Database::get_cage(&tx, id)?.ok_or_else(|| Error::DatabaseCorruption {
        details: format!("cage {id} missing right after insert"),
    })?;
    tx.commit()?;
    Ok(cage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cage::{CageId, CageStatus};
    use crate::database::test_util::create_test_database;

    #[test]
    fn test_provision_cage() {
        let mut db = create_test_database();

        let cage = provision_cage(&mut db, Capacity::try_from(2_i64).unwrap(), Category::Herbivore)
            .unwrap();
        assert_eq!(cage.id, CageId::new(1));
        assert_eq!(cage.status, CageStatus::Active);
        assert_eq!(cage.occupancy, 0);
        assert_eq!(cage.capacity.value(), 2);
        assert_eq!(cage.category, Category::Herbivore);
    }

    #[test]
    fn test_explicit_capacity_does_not_become_the_default() {
        let mut db = create_test_database();
        let small = provision_cage(&mut db, Capacity::try_from(1_i64).unwrap(), Category::Herbivore)
            .unwrap();

        let allocator = Allocator::new(db.connection());
        assert_eq!(allocator.reserve_slot(Category::Herbivore, None).unwrap(), small.id);
        let overflow = allocator.reserve_slot(Category::Herbivore, None).unwrap();

        let overflow = Database::get_cage(db.connection(), overflow).unwrap().unwrap();
        assert_eq!(overflow.capacity, Capacity::DEFAULT);
    }

    #[test]
    fn test_provisioned_ids_increase() {
        let mut db = create_test_database();

        let first = provision_cage(&mut db, Capacity::DEFAULT, Category::Carnivore).unwrap();
        let second = provision_cage(&mut db, Capacity::DEFAULT, Category::Carnivore).unwrap();
        assert!(second.id > first.id);
    }
}
