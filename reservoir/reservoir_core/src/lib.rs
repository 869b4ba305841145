//! # Reservoir Core
//!
//! `reservoir_core` provides the building blocks shared by the Reservoir
//! crates: the error hierarchy, strongly-typed identifiers, the [`Model`]
//! capability trait that pooled resources implement, a couple of concrete
//! models, and configuration and logging utilities.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for pool, model and configuration failures
//! - **id**: Strongly-typed identifier types
//! - **traits**: The `Model` capability interface
//! - **models**: Concrete models (`SampleModel`, `CountingModel`)
//! - **utils**: Configuration and logging helpers

pub mod error;
pub mod id;
pub mod models;
pub mod traits;
pub mod utils;

// Re-export key types and traits for convenience
pub use error::{ConfigError, Error, ModelError, PoolError, Result};
pub use id::{PoolId, ResourceId};
pub use models::{CountingModel, SampleModel};
pub use traits::Model;
pub use utils::{ExhaustionPolicy, LogLevel, PoolConfig};
