//! Checked-out models.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use log::warn;
use parking_lot::MutexGuard;
use reservoir_core::id::{PoolId, ResourceId};
use reservoir_core::Model;

use super::model_pool::{ModelPool, SharedModel};

/// Exclusive checkout of one pooled model.
///
/// While a lease exists its model is in the pool's in-use set and no other
/// caller can obtain it. Hand it back with [`ModelPool::release`] to see
/// whether the reset succeeded. A lease that is simply dropped goes back
/// through the same reset-then-free path, and a reset failure there can
/// only be logged.
pub struct Lease<M: Model> {
    id: ResourceId,
    pool_id: PoolId,
    model: SharedModel<M>,
    pool: Weak<ModelPool<M>>,
    acquired_at: Instant,
    returned: bool,
}

impl<M: Model> Lease<M> {
    pub(crate) fn new(
        id: ResourceId,
        model: SharedModel<M>,
        pool: &Arc<ModelPool<M>>,
    ) -> Self {
        Self {
            id,
            pool_id: pool.id(),
            model,
            pool: Arc::downgrade(pool),
            acquired_at: Instant::now(),
            returned: false,
        }
    }

    /// Identity tag the pool gave this model when it was added.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// The pool this lease was issued by.
    pub fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    /// Run an inference on the leased model.
    pub fn predict(&mut self, inputs: &[M::Input]) -> Vec<M::Output> {
        self.model.lock().predict(inputs)
    }

    /// Direct access to the leased model.
    ///
    /// The guard borrows the lease, so it cannot outlive a release:
    ///
    /// ```compile_fail
    /// use reservoir_core::SampleModel;
    /// use reservoir_pool::{shared, ModelPool};
    ///
    /// let pool = ModelPool::<SampleModel>::with_defaults();
    /// pool.add(shared(SampleModel::seeded(1))).unwrap();
    /// let lease = pool.get().unwrap();
    /// let guard = lease.lock();
    /// pool.release(lease).unwrap();
    /// drop(guard);
    /// ```
    pub fn lock(&self) -> MutexGuard<'_, M> {
        self.model.lock()
    }

    /// Time since this lease was issued.
    pub fn held_duration(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    /// Hand the model over for an explicit release. After this the lease's
    /// drop is a no-op.
    pub(crate) fn surrender(&mut self) -> SharedModel<M> {
        self.returned = true;
        Arc::clone(&self.model)
    }
}

impl<M: Model> Drop for Lease<M> {
    fn drop(&mut self) {
        if self.returned {
            return;
        }

        // Pool gone: nothing to return to, the model handle is simply dropped.
        if let Some(pool) = self.pool.upgrade() {
            let model = self.surrender();
            if let Err(e) = pool.return_resource(self.id, model) {
                warn!("Dropped lease {} could not be returned: {}", self.id.short(), e);
            }
        }
    }
}

impl<M: Model> fmt::Debug for Lease<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease")
            .field("id", &self.id)
            .field("pool_id", &self.pool_id)
            .field("held", &self.held_duration())
            .finish()
    }
}
