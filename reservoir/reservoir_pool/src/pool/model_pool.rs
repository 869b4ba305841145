//! Pool of reusable, resettable models.
//!
//! Every model the pool tracks is in exactly one of two sets, `free` or
//! `in_use`. The sets hold `ResourceId`s; the models themselves live in a
//! single owning table keyed by id. One mutex guards the whole partition.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use parking_lot::{Condvar, Mutex};
use reservoir_core::id::{PoolId, ResourceId};
use reservoir_core::{Model, PoolConfig, PoolError};

use super::lease::Lease;
use super::waiters::WaitQueue;

/// Handle a model is added to the pool with.
///
/// Pool membership is by identity: two clones of the same handle are the
/// same resource, two separately allocated models are different ones even
/// when their state is equal. Keeping a clone after [`ModelPool::add`] is
/// fine for identity checks like [`ModelPool::contains`], but it must not
/// be used to reach the model while the pool tracks it.
pub type SharedModel<M> = Arc<Mutex<M>>;

/// Wrap a freshly built model in a [`SharedModel`] handle.
pub fn shared<M: Model>(model: M) -> SharedModel<M> {
    Arc::new(Mutex::new(model))
}

/// Counters describing a pool's lifetime activity
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Successful `add` calls
    pub total_added: usize,

    /// Leases handed out
    pub total_checkouts: usize,

    /// Models reset and moved back to the free set
    pub total_releases: usize,

    /// Releases whose reset failed, leaving the model checked out
    pub reset_failures: usize,

    /// Fail-fast `get` calls rejected with `PoolExhausted`
    pub exhausted_rejections: usize,

    /// Blocking `get` calls that gave up waiting
    pub timeouts: usize,
}

struct PoolState<M: Model> {
    /// Owning table for every tracked model
    table: HashMap<ResourceId, SharedModel<M>>,

    /// Allocation address of each tracked handle, for the duplicate check.
    /// The table keeps every tracked allocation alive, so addresses are stable.
    index: HashMap<usize, ResourceId>,

    /// Free models, longest-idle first
    free: VecDeque<ResourceId>,

    /// Checked-out models
    in_use: HashSet<ResourceId>,

    /// Callers blocked in `get_with_timeout`
    waiters: WaitQueue,

    stats: PoolStats,

    shutdown: bool,
}

impl<M: Model> PoolState<M> {
    fn new() -> Self {
        Self {
            table: HashMap::new(),
            index: HashMap::new(),
            free: VecDeque::new(),
            in_use: HashSet::new(),
            waiters: WaitQueue::default(),
            stats: PoolStats::default(),
            shutdown: false,
        }
    }
}

/// A pool of reusable models
///
/// `get` hands out the model that has been free the longest. Callers should
/// not rely on which model they receive.
pub struct ModelPool<M: Model> {
    id: PoolId,

    state: Mutex<PoolState<M>>,

    /// Signalled whenever a model becomes free or the pool shuts down
    available: Condvar,

    config: PoolConfig,
}

impl<M: Model> ModelPool<M> {
    /// Create an empty pool with the specified configuration
    pub fn new(config: PoolConfig) -> Arc<Self> {
        let pool = Arc::new(Self {
            id: PoolId::new(),
            state: Mutex::new(PoolState::new()),
            available: Condvar::new(),
            config,
        });

        info!(
            "Created model pool '{}' ({}) with {:?} exhaustion policy",
            pool.config.name,
            pool.id.short(),
            pool.config.exhaustion
        );

        pool
    }

    /// Create an empty fail-fast pool
    pub fn with_defaults() -> Arc<Self> {
        Self::new(PoolConfig::default())
    }

    /// This pool's identifier
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// The configuration this pool was created with
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Start tracking `model` as a free resource.
    ///
    /// Fails with `DuplicateResource` if this exact handle (or a clone of
    /// it) is already tracked, whether free or checked out.
    ///
    /// Once added, the model must only be used through a [`Lease`]. The
    /// pool cannot stop a caller who kept a clone of `model` from locking
    /// it while someone else holds the lease.
    pub fn add(&self, model: SharedModel<M>) -> Result<ResourceId, PoolError> {
        let key = Arc::as_ptr(&model) as usize;
        let mut state = self.state.lock();

        if state.shutdown {
            return Err(PoolError::PoolShutdown);
        }

        if let Some(existing) = state.index.get(&key) {
            return Err(PoolError::DuplicateResource(*existing));
        }

        let id = ResourceId::new();
        state.index.insert(key, id);
        state.table.insert(id, model);
        state.free.push_back(id);
        state.stats.total_added += 1;
        drop(state);

        self.available.notify_all();
        debug!("[{}] Added resource {}", self.config.name, id.short());
        Ok(id)
    }

    /// Check out a model, following the configured exhaustion policy
    pub fn get(self: &Arc<Self>) -> Result<Lease<M>, PoolError> {
        match self.config.exhaustion.timeout() {
            None => self.try_get(),
            Some(timeout) => self.get_with_timeout(timeout),
        }
    }

    /// Check out a model without waiting
    pub fn try_get(self: &Arc<Self>) -> Result<Lease<M>, PoolError> {
        let mut state = self.state.lock();

        if state.shutdown {
            return Err(PoolError::PoolShutdown);
        }

        // Blocked callers are ahead in line.
        if state.waiters.is_empty() {
            if let Some(lease) = self.checkout(&mut state) {
                return Ok(lease);
            }
        }

        state.stats.exhausted_rejections += 1;
        trace!(
            "[{}] Pool exhausted ({} waiting)",
            self.config.name,
            state.waiters.len()
        );
        Err(PoolError::PoolExhausted)
    }

    /// Check out a model, waiting up to `timeout` for one to be released.
    ///
    /// Waiting callers are served in arrival order. A zero timeout behaves
    /// like [`try_get`](Self::try_get). A timeout too large to express as a
    /// deadline, such as `Duration::MAX`, waits until a model is released
    /// or the pool shuts down.
    pub fn get_with_timeout(self: &Arc<Self>, timeout: Duration) -> Result<Lease<M>, PoolError> {
        if timeout.is_zero() {
            return self.try_get();
        }

        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.state.lock();

        if state.shutdown {
            return Err(PoolError::PoolShutdown);
        }

        if state.waiters.is_empty() {
            if let Some(lease) = self.checkout(&mut state) {
                return Ok(lease);
            }
        }

        let ticket = state.waiters.enqueue();
        trace!(
            "[{}] Waiting for a resource (ticket {}, {} in line)",
            self.config.name,
            ticket,
            state.waiters.len()
        );

        loop {
            if state.shutdown {
                state.waiters.remove(ticket);
                return Err(PoolError::PoolShutdown);
            }

            if state.waiters.is_front(ticket) && !state.free.is_empty() {
                state.waiters.remove(ticket);
                let lease = self.checkout(&mut state);
                // The next waiter may be able to proceed too.
                self.available.notify_all();
                if let Some(lease) = lease {
                    trace!("[{}] Ticket {} served", self.config.name, ticket);
                    return Ok(lease);
                }
            }

            let timed_out = match deadline {
                Some(deadline) => self.available.wait_until(&mut state, deadline).timed_out(),
                None => {
                    self.available.wait(&mut state);
                    false
                }
            };

            if timed_out {
                if state.waiters.is_front(ticket) && !state.free.is_empty() && !state.shutdown {
                    continue;
                }

                state.waiters.remove(ticket);
                state.stats.timeouts += 1;
                // Leaving may have moved someone else to the front.
                self.available.notify_all();
                debug!(
                    "[{}] Gave up waiting for a resource after {:?}",
                    self.config.name, timeout
                );
                return Err(PoolError::Timeout(timeout));
            }
        }
    }

    /// Move the longest-idle free model to the in-use set.
    fn checkout(self: &Arc<Self>, state: &mut PoolState<M>) -> Option<Lease<M>> {
        let id = state.free.pop_front()?;
        let model = Arc::clone(state.table.get(&id)?);

        state.in_use.insert(id);
        state.stats.total_checkouts += 1;
        debug!("[{}] Checked out resource {}", self.config.name, id.short());

        Some(Lease::new(id, model, self))
    }

    /// Reset a checked-out model and return it to the free set.
    ///
    /// Fails with `NotInUse` if the lease was not issued by this pool. Such
    /// a lease is dropped here, which hands it back to the pool that did
    /// issue it. If the model's reset fails the error is returned and the
    /// model stays checked out, so it is never handed out uncleaned.
    pub fn release(&self, mut lease: Lease<M>) -> Result<(), PoolError> {
        if lease.pool_id() != self.id {
            return Err(PoolError::NotInUse(lease.id()));
        }

        let id = lease.id();
        let model = lease.surrender();
        self.return_resource(id, model)
    }

    pub(crate) fn return_resource(
        &self,
        id: ResourceId,
        model: SharedModel<M>,
    ) -> Result<(), PoolError> {
        {
            let state = self.state.lock();
            let tracked = state
                .table
                .get(&id)
                .is_some_and(|owned| Arc::ptr_eq(owned, &model));

            if !tracked || !state.in_use.contains(&id) {
                return Err(PoolError::NotInUse(id));
            }
        }

        // The id stays in `in_use` while resetting, so nobody else can take it.
        let reset = {
            let mut guard = model.lock();
            trace!("[{}] Resetting {} ({})", self.config.name, guard.name(), id.short());
            guard.reset()
        };

        let mut state = self.state.lock();
        match reset {
            Ok(()) => {
                state.in_use.remove(&id);
                state.free.push_back(id);
                state.stats.total_releases += 1;
                drop(state);

                self.available.notify_all();
                debug!("[{}] Released resource {}", self.config.name, id.short());
                Ok(())
            }
            Err(source) => {
                state.stats.reset_failures += 1;
                warn!(
                    "[{}] Reset of resource {} failed, keeping it checked out: {}",
                    self.config.name,
                    id.short(),
                    source
                );
                Err(PoolError::ResourceResetFailed { id, source })
            }
        }
    }

    /// Number of models ready to be checked out
    pub fn free_count(&self) -> usize {
        self.state.lock().free.len()
    }

    /// Number of models currently checked out
    pub fn in_use_count(&self) -> usize {
        self.state.lock().in_use.len()
    }

    /// Number of tracked models (free + in use)
    pub fn total_count(&self) -> usize {
        self.state.lock().table.len()
    }

    /// Whether this exact handle is tracked by the pool
    pub fn contains(&self, model: &SharedModel<M>) -> bool {
        let key = Arc::as_ptr(model) as usize;
        self.state.lock().index.contains_key(&key)
    }

    /// Whether the resource with `id` is currently checked out
    pub fn is_checked_out(&self, id: ResourceId) -> bool {
        self.state.lock().in_use.contains(&id)
    }

    /// Number of callers blocked waiting for a resource
    pub fn waiting_count(&self) -> usize {
        self.state.lock().waiters.len()
    }

    /// Get the current statistics for this pool
    pub fn stats(&self) -> PoolStats {
        self.state.lock().stats.clone()
    }

    /// Stop handing out models.
    ///
    /// Blocked and future `get` calls fail with `PoolShutdown`, as does
    /// `add`. Outstanding leases can still be released. Models are not
    /// destroyed; that is left to whoever owns their handles.
    pub fn shutdown(&self) {
        info!("Shutting down model pool '{}'...", self.config.name);

        let mut state = self.state.lock();
        state.shutdown = true;
        let (free, in_use) = (state.free.len(), state.in_use.len());
        drop(state);

        self.available.notify_all();
        info!(
            "Model pool '{}' shut down with {} free and {} checked out",
            self.config.name, free, in_use
        );
    }

    /// Whether [`shutdown`](Self::shutdown) has been called
    pub fn is_shutdown(&self) -> bool {
        self.state.lock().shutdown
    }
}

impl<M: Model> fmt::Display for ModelPool<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        write!(f, "Pool(free={}, in_use={})", state.free.len(), state.in_use.len())
    }
}

impl<M: Model> fmt::Debug for ModelPool<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ModelPool")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("free", &state.free.len())
            .field("in_use", &state.in_use.len())
            .field("waiting", &state.waiters.len())
            .finish()
    }
}
