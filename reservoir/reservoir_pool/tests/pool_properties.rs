//! Property tests for the free/in-use partition.
//!
//! Random sequences of `add`, `get`, `release` and lease drops are replayed
//! against a pool, checking the partition after every step.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use reservoir_core::{CountingModel, PoolError, ResourceId};
use reservoir_pool::{shared, Lease, ModelPool, SharedModel};

#[derive(Debug, Clone)]
enum PoolOp {
    /// Add a fresh model
    Add,
    /// Re-add a previously added handle (always a duplicate)
    AddExisting(usize),
    /// Check out a model and run a prediction on it
    Get,
    /// Explicitly release one of the held leases
    Release(usize),
    /// Drop one of the held leases without releasing it
    Drop(usize),
}

fn pool_op() -> impl Strategy<Value = PoolOp> {
    prop_oneof![
        3 => Just(PoolOp::Add),
        1 => (0usize..16).prop_map(PoolOp::AddExisting),
        4 => Just(PoolOp::Get),
        3 => (0usize..16).prop_map(PoolOp::Release),
        1 => (0usize..16).prop_map(PoolOp::Drop),
    ]
}

proptest! {
    #[test]
    fn partition_invariant_holds(ops in prop::collection::vec(pool_op(), 1..64)) {
        let pool = ModelPool::<CountingModel>::with_defaults();
        let mut handles: Vec<SharedModel<CountingModel>> = Vec::new();
        let mut held: Vec<Lease<CountingModel>> = Vec::new();
        let mut successful_adds = 0usize;

        for op in ops {
            match op {
                PoolOp::Add => {
                    let model = shared(CountingModel::new());
                    pool.add(Arc::clone(&model)).unwrap();
                    handles.push(model);
                    successful_adds += 1;
                }
                PoolOp::AddExisting(i) => {
                    if !handles.is_empty() {
                        let model = Arc::clone(&handles[i % handles.len()]);
                        let duplicate = matches!(
                            pool.add(model),
                            Err(PoolError::DuplicateResource(_))
                        );
                        prop_assert!(duplicate);
                    }
                }
                PoolOp::Get => {
                    let free_before = pool.free_count();
                    match pool.get() {
                        Ok(mut lease) => {
                            prop_assert!(free_before > 0);
                            let held_ids: HashSet<ResourceId> =
                                held.iter().map(|l| l.id()).collect();
                            prop_assert!(!held_ids.contains(&lease.id()));
                            // Reset contract: a fresh checkout carries no earlier state.
                            prop_assert_eq!(lease.predict(&[10, 20]), vec![10, 20]);
                            held.push(lease);
                        }
                        Err(PoolError::PoolExhausted) => prop_assert_eq!(free_before, 0),
                        Err(e) => prop_assert!(false, "unexpected error: {}", e),
                    }
                }
                PoolOp::Release(i) => {
                    if !held.is_empty() {
                        let lease = held.swap_remove(i % held.len());
                        pool.release(lease).unwrap();
                    }
                }
                PoolOp::Drop(i) => {
                    if !held.is_empty() {
                        drop(held.swap_remove(i % held.len()));
                    }
                }
            }

            prop_assert_eq!(pool.free_count() + pool.in_use_count(), successful_adds);
            prop_assert_eq!(pool.total_count(), successful_adds);
            prop_assert_eq!(pool.in_use_count(), held.len());
        }
    }
}
