//! Property-based tests for the allocator.
//!
//! A random sequence of reservations, releases and status changes is
//! replayed against a scratch database and a simple model. After every step
//! the store must agree with the model, and no cage may ever be over
//! capacity, occupied while down, or hold the wrong category.

use proptest::prelude::*;

use super::Allocator;
use crate::cage::{CageId, CageStatus, Capacity, Category};
use crate::database::test_util::create_test_database;
use crate::database::Database;
use crate::error::Error;

#[derive(Debug, Clone)]
enum Step {
    ReserveAny(Category),
    ReserveIn(usize, Category),
    Release(usize),
    SetStatus(usize, CageStatus),
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![Just(Category::Herbivore), Just(Category::Carnivore)]
}

fn status_strategy() -> impl Strategy<Value = CageStatus> {
    prop_oneof![Just(CageStatus::Active), Just(CageStatus::Down)]
}

// Cage references are indices into the cages created so far, taken modulo
// their count when the step is applied.
fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => category_strategy().prop_map(Step::ReserveAny),
        3 => (any::<usize>(), category_strategy()).prop_map(|(i, c)| Step::ReserveIn(i, c)),
        2 => any::<usize>().prop_map(Step::Release),
        1 => (any::<usize>(), status_strategy()).prop_map(|(i, s)| Step::SetStatus(i, s)),
    ]
}

#[derive(Debug, Clone)]
struct ModelCage {
    id: CageId,
    capacity: u32,
    occupancy: u32,
    category: Category,
    status: CageStatus,
}

fn check_store(db: &Database, model: &[ModelCage]) {
    let cages = Database::list_cages(db.connection(), None, None).unwrap();
    assert_eq!(cages.len(), model.len());
    for (cage, expected) in cages.iter().zip(model) {
        assert_eq!(cage.id, expected.id);
        assert_eq!(cage.occupancy, expected.occupancy);
        assert_eq!(cage.status, expected.status);
        assert_eq!(cage.category, expected.category);
        assert!(cage.occupancy <= cage.capacity.value());
        assert!(cage.status == CageStatus::Active || cage.occupancy == 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn allocator_preserves_occupancy_invariants(
        capacity in 1i64..=4,
        steps in prop::collection::vec(step_strategy(), 1..40),
    ) {
        let db = create_test_database();
        let capacity = Capacity::try_from(capacity).unwrap();
        let allocator = Allocator::new(db.connection()).with_default_capacity(capacity);
        let mut model: Vec<ModelCage> = Vec::new();

        for step in steps {
            match step {
                Step::ReserveAny(category) => {
                    let cage = allocator.reserve_slot(category, None).unwrap();
                    let expected = model.iter().position(|c| {
                        c.status == CageStatus::Active
                            && c.category == category
                            && c.occupancy < c.capacity
                    });
                    if let Some(i) = expected {
                        prop_assert_eq!(model[i].id, cage);
                        model[i].occupancy += 1;
                    } else {
                        prop_assert!(model.iter().all(|c| c.id < cage));
                        model.push(ModelCage {
                            id: cage,
                            capacity: capacity.value(),
                            occupancy: 1,
                            category,
                            status: CageStatus::Active,
                        });
                    }
                }
                Step::ReserveIn(index, category) => {
                    if model.is_empty() {
                        continue;
                    }
                    let count = model.len();
                    let slot = &mut model[index % count];
                    let result = allocator.reserve_slot(category, Some(slot.id));
                    match result {
                        Ok(cage) => {
                            prop_assert_eq!(cage, slot.id);
                            prop_assert_eq!(slot.status, CageStatus::Active);
                            prop_assert_eq!(slot.category, category);
                            prop_assert!(slot.occupancy < slot.capacity);
                            slot.occupancy += 1;
                        }
                        Err(Error::CageNotActive { .. }) => {
                            prop_assert_eq!(slot.status, CageStatus::Down);
                        }
                        Err(Error::CageWrongCategory { .. }) => {
                            prop_assert_eq!(slot.status, CageStatus::Active);
                            prop_assert_ne!(slot.category, category);
                        }
                        Err(Error::CageFull { .. }) => {
                            prop_assert_eq!(slot.status, CageStatus::Active);
                            prop_assert_eq!(slot.category, category);
                            prop_assert_eq!(slot.occupancy, slot.capacity);
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {other}"),
                    }
                }
                Step::Release(index) => {
                    if model.is_empty() {
                        continue;
                    }
                    let count = model.len();
                    let slot = &mut model[index % count];
                    let released = allocator.release_slot(slot.id).is_ok();
                    prop_assert_eq!(released, slot.occupancy > 0);
                    if released {
                        slot.occupancy -= 1;
                    }
                }
                Step::SetStatus(index, status) => {
                    if model.is_empty() {
                        continue;
                    }
                    let count = model.len();
                    let slot = &mut model[index % count];
                    let updated =
                        Database::update_cage_status(db.connection(), slot.id, status).unwrap();
                    let allowed = status == CageStatus::Active || slot.occupancy == 0;
                    prop_assert_eq!(updated, allowed);
                    if updated {
                        slot.status = status;
                    }
                }
            }

            check_store(&db, &model);
        }
    }
}
