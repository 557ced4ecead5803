//! Admitting occupants to cages.
//!
//! Each admission runs in one `IMMEDIATE` transaction that pairs the
//! occupancy increment with the new occupant row. The transaction is only
//! committed once both writes succeeded; any error drops it, which rolls
//! back whatever part already ran.

use crate::allocator::Allocator;
use crate::cage::{CageId, Capacity};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::occupant::{NewOccupant, Occupant};
use crate::species::SpeciesCatalog;

/// Admission of occupants, with species lookup.
///
/// # Examples
///
/// ```no_run
/// use dinocage::database::{Database, DatabaseConfig};
/// use dinocage::operations::AdmissionService;
/// use dinocage::{NewOccupant, SpeciesCatalog};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
/// let species = SpeciesCatalog::builtin();
///
/// let mut admissions = AdmissionService::new(&mut db, &species);
/// let rex = NewOccupant::new("tyrannosaurus", "Barnie").unwrap();
/// let admitted = admissions.admit_to_any_cage(&rex).unwrap();
/// println!("{} is in cage {}", admitted.name, admitted.cage);
/// ```
#[derive(Debug)]
pub struct AdmissionService<'a> {
    db: &'a mut Database,
    species: &'a SpeciesCatalog,
    default_capacity: Capacity,
}

impl<'a> AdmissionService<'a> {
    /// Creates a service that provisions cages of [`Capacity::DEFAULT`].
    #[must_use]
    pub fn new(db: &'a mut Database, species: &'a SpeciesCatalog) -> Self {
        Self {
            db,
            species,
            default_capacity: Capacity::DEFAULT,
        }
    }

    /// Sets the capacity of cages provisioned on demand.
    #[must_use]
    pub const fn with_default_capacity(mut self, capacity: Capacity) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Admits an occupant to the first active cage of its category with
    /// spare capacity, provisioning a new cage if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSpecies`] if the species has no category,
    /// or [`Error::StoreUnavailable`] if the store fails. Nothing is
    /// written in either case.
    pub fn admit_to_any_cage(&mut self, occupant: &NewOccupant) -> Result<Occupant> {
        self.admit(occupant, None)
    }

    /// Admits an occupant to a specific cage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSpecies`] if the species has no category,
    /// and otherwise the same errors as [`Allocator::reserve_slot`] with a
    /// target. Nothing is written on error.
    pub fn admit_to_cage(&mut self, occupant: &NewOccupant, cage: CageId) -> Result<Occupant> {
        self.admit(occupant, Some(cage))
    }

    fn admit(&mut self, occupant: &NewOccupant, target: Option<CageId>) -> Result<Occupant> {
        let category =
            self.species
                .category_for(occupant.species())
                .ok_or_else(|| Error::UnknownSpecies {
                    species: occupant.species().to_string(),
                })?;

        let tx = self.db.begin_transaction()?;
        let cage = Allocator::new(&tx)
            .with_default_capacity(self.default_capacity)
            .reserve_slot(category, target)?;
        let admitted = Database::insert_occupant(&tx, occupant, category, cage)?;
        tx.commit()?;

        log::info!(
            "admitted {} '{}' as occupant {} to cage {}",
            admitted.species,
            admitted.name,
            admitted.id,
            admitted.cage
        );
        Ok(admitted)
    }
}
