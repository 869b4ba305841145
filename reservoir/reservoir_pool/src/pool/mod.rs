//! Model pooling with exclusive checkout.
//!
//! - [`ModelPool`]: owns the free/in-use partition
//! - [`Lease`]: a checked-out model, returned to its pool on release or drop
//! - waiters: the FIFO ticket queue blocking `get` calls line up in

pub mod lease;
pub mod model_pool;
mod waiters;

pub use lease::Lease;
pub use model_pool::{shared, ModelPool, PoolStats, SharedModel};
