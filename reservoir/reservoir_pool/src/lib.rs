#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # Reservoir Pool
//!
//! A thread-safe pool of expensive-to-create, cheap-to-reuse models.
//!
//! Models are created by the application and handed to the pool with
//! [`ModelPool::add`]. Callers check one out with [`ModelPool::get`], which
//! returns a [`Lease`], and hand it back with [`ModelPool::release`]. Every
//! release resets the model before any other caller can see it again.
//!
//! ```
//! use reservoir_core::SampleModel;
//! use reservoir_pool::{shared, ModelPool};
//!
//! let pool = ModelPool::with_defaults();
//! pool.add(shared(SampleModel::seeded(1))).unwrap();
//!
//! let mut lease = pool.get().unwrap();
//! let outputs = lease.predict(&[1, 2, 3]);
//! assert_eq!(outputs.len(), 3);
//! pool.release(lease).unwrap();
//! assert_eq!(pool.free_count(), 1);
//! ```

/// Model pooling with exclusive checkout
pub mod pool;

// Re-export key types for easier access
pub use pool::{shared, Lease, ModelPool, PoolStats, SharedModel};
