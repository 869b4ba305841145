//! Configuration and logging helpers.

pub mod config;
pub mod logging;

pub use config::{ExhaustionPolicy, PoolConfig};
pub use logging::LogLevel;
