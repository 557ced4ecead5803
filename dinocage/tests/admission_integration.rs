//! Admission, lifecycle and provisioning through the public API.

mod common;

use common::{occupant, TestStore};
use dinocage::{
    release_occupant, set_cage_status, verify_database, AdmissionService, CageId, CageStatus,
    Category, Database, Error, ErrorKind, OccupantFilter, SpeciesCatalog,
};

fn species() -> SpeciesCatalog {
    SpeciesCatalog::builtin()
}

fn occupant_count(db: &Database) -> usize {
    Database::list_occupants(db.connection(), &OccupantFilter::default())
        .unwrap()
        .len()
}

#[test]
fn test_fill_cage_then_reject() {
    let store = TestStore::new();
    let species = species();
    let cage = store.cage(2, Category::Herbivore);
    assert_eq!(cage, CageId::new(1));

    let mut db = store.open();
    let mut admissions = AdmissionService::new(&mut db, &species);

    admissions
        .admit_to_cage(&occupant("stegosaurus", "Leaf"), cage)
        .unwrap();
    assert_eq!(store.get(cage).occupancy, 1);

    admissions
        .admit_to_cage(&occupant("stegosaurus", "Grass"), cage)
        .unwrap();
    assert_eq!(store.get(cage).occupancy, 2);

    let err = admissions
        .admit_to_cage(&occupant("stegosaurus", "Fern"), cage)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CageFull);
    assert_eq!(store.get(cage).occupancy, 2);
    assert_eq!(occupant_count(&db), 2);
}

#[test]
fn test_powered_down_cage_rejects_admission() {
    let store = TestStore::new();
    let species = species();
    let cage = store.cage(2, Category::Herbivore);

    let mut db = store.open();
    set_cage_status(&mut db, cage, CageStatus::Down).unwrap();

    let err = AdmissionService::new(&mut db, &species)
        .admit_to_cage(&occupant("triceratops", "Tri"), cage)
        .unwrap_err();
    assert!(matches!(err, Error::CageNotActive { .. }));
    assert_eq!(store.get(cage).occupancy, 0);
}

#[test]
fn test_occupied_cage_cannot_power_down() {
    let store = TestStore::new();
    let species = species();
    let cage = store.cage(2, Category::Herbivore);

    let mut db = store.open();
    AdmissionService::new(&mut db, &species)
        .admit_to_cage(&occupant("triceratops", "Tri"), cage)
        .unwrap();

    let err = set_cage_status(&mut db, cage, CageStatus::Down).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CageNotEmpty);
    assert_eq!(store.get(cage).status, CageStatus::Active);
}

#[test]
fn test_wrong_category_never_mutates() {
    let store = TestStore::new();
    let species = species();
    let cage = store.cage(5, Category::Carnivore);

    let mut db = store.open();
    let err = AdmissionService::new(&mut db, &species)
        .admit_to_cage(&occupant("brachiosaurus", "Longneck"), cage)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CageWrongCategory);
    assert_eq!(store.get(cage).occupancy, 0);
    assert_eq!(occupant_count(&db), 0);
}

#[test]
fn test_failed_insert_rolls_back_reservation() {
    let store = TestStore::new();
    let species = species();
    let cage = store.cage(3, Category::Carnivore);

    let mut db = store.open();
    db.connection()
        .execute_batch(
            "CREATE TRIGGER reject_admissions BEFORE INSERT ON dinosaurs
             BEGIN SELECT RAISE(ABORT, 'admissions closed'); END;",
        )
        .unwrap();

    let mut admissions = AdmissionService::new(&mut db, &species);
    let err = admissions
        .admit_to_any_cage(&occupant("velociraptor", "Blue"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreUnavailable);

    let err = admissions
        .admit_to_cage(&occupant("velociraptor", "Charlie"), cage)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreUnavailable);

    assert_eq!(store.get(cage).occupancy, 0);
    assert_eq!(occupant_count(&db), 0);
    assert_eq!(
        Database::list_cages(db.connection(), None, None)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_successful_admission_pairs_row_and_slot() {
    let store = TestStore::new();
    let species = species();

    let mut db = store.open();
    let admitted = AdmissionService::new(&mut db, &species)
        .admit_to_any_cage(&occupant("spinosaurus", "Sail"))
        .unwrap();

    let in_cage = Database::list_occupants(
        db.connection(),
        &OccupantFilter::default().with_cage(Some(admitted.cage)),
    )
    .unwrap();
    assert_eq!(in_cage.len(), 1);
    assert_eq!(store.get(admitted.cage).occupancy, 1);
    assert!(verify_database(&db).unwrap().is_clean());
}

#[test]
fn test_find_or_create_provisions_one_cage() {
    let store = TestStore::new();
    let species = species();
    store.cage(20, Category::Herbivore);

    let mut db = store.open();
    let admitted = AdmissionService::new(&mut db, &species)
        .admit_to_any_cage(&occupant("tyrannosaurus", "Rex"))
        .unwrap();

    let carnivore_cages =
        Database::list_cages(db.connection(), None, Some(Category::Carnivore)).unwrap();
    assert_eq!(carnivore_cages.len(), 1);
    assert_eq!(carnivore_cages[0].id, admitted.cage);
    assert_eq!(carnivore_cages[0].occupancy, 1);
}

#[test]
fn test_full_cage_overflows_into_new_cage() {
    let store = TestStore::new();
    let species = species();
    let first = store.cage(20, Category::Carnivore);

    let mut db = store.open();
    let mut admissions = AdmissionService::new(&mut db, &species);
    for i in 0..19 {
        admissions
            .admit_to_cage(&occupant("velociraptor", &format!("raptor-{i}")), first)
            .unwrap();
    }

    let twentieth = admissions
        .admit_to_any_cage(&occupant("velociraptor", "raptor-19"))
        .unwrap();
    assert_eq!(twentieth.cage, first);
    assert_eq!(store.get(first).occupancy, 20);

    let overflow = admissions
        .admit_to_any_cage(&occupant("velociraptor", "raptor-20"))
        .unwrap();
    assert_ne!(overflow.cage, first);
    assert_eq!(store.get(overflow.cage).occupancy, 1);
}

#[test]
fn test_release_then_power_down() {
    let store = TestStore::new();
    let species = species();
    let cage = store.cage(2, Category::Herbivore);

    let mut db = store.open();
    let admitted = AdmissionService::new(&mut db, &species)
        .admit_to_cage(&occupant("ankylosaurus", "Club"), cage)
        .unwrap();
    release_occupant(&mut db, admitted.id).unwrap();

    let cage = set_cage_status(&mut db, cage, CageStatus::Down).unwrap();
    assert_eq!(cage.status, CageStatus::Down);
    assert!(verify_database(&db).unwrap().is_clean());
}

#[test]
fn test_unknown_species_is_rejected() {
    let store = TestStore::new();
    let species = SpeciesCatalog::from_json(r#"[{"name": "compsognathus", "diet": "C"}]"#).unwrap();

    let mut db = store.open();
    let mut admissions = AdmissionService::new(&mut db, &species);
    admissions
        .admit_to_any_cage(&occupant("Compsognathus", "Tiny"))
        .unwrap();

    let err = admissions
        .admit_to_any_cage(&occupant("tyrannosaurus", "Rex"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownSpecies);
}

#[test]
fn test_occupant_listing_filters() {
    let store = TestStore::new();
    let species = species();

    let mut db = store.open();
    let mut admissions = AdmissionService::new(&mut db, &species);
    admissions
        .admit_to_any_cage(&occupant("velociraptor", "Blue"))
        .unwrap();
    admissions
        .admit_to_any_cage(&occupant("velociraptor", "Delta"))
        .unwrap();
    admissions
        .admit_to_any_cage(&occupant("stegosaurus", "Spike"))
        .unwrap();

    let raptors = Database::list_occupants(
        db.connection(),
        &OccupantFilter::default().with_species(Some("VELOCIRAPTOR".into())),
    )
    .unwrap();
    assert_eq!(raptors.len(), 2);

    let herbivores = Database::list_occupants(
        db.connection(),
        &OccupantFilter::default().with_category(Some(Category::Herbivore)),
    )
    .unwrap();
    assert_eq!(herbivores.len(), 1);
    assert_eq!(herbivores[0].name, "Spike");
}
