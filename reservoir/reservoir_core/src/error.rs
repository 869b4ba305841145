//! Error types for the Reservoir crates.
//!
//! Errors are organized by subsystem. The root error type, `Error`, wraps
//! the pool and configuration errors together with I/O failures, so that
//! callers which do not care about the distinction can use a single
//! `Result` alias. Model errors only ever surface through
//! `PoolError::ResourceResetFailed`.

use std::time::Duration;

use crate::id::ResourceId;
use thiserror::Error;

/// Root error type for Reservoir.
#[derive(Debug, Error)]
pub enum Error {
    /// Pool contract violations and pool state errors
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    /// Configuration loading and validation errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by pool operations.
///
/// `DuplicateResource`, `PoolExhausted` and `NotInUse` are caller contract
/// violations. The pool never retries them.
#[derive(Debug, Error)]
pub enum PoolError {
    /// `add` was called with a resource the pool already tracks
    #[error("resource {0} is already tracked by this pool")]
    DuplicateResource(ResourceId),

    /// `get` was called while no resource was free
    #[error("resource pool exhausted")]
    PoolExhausted,

    /// `release` was called with a resource that is not checked out from this pool
    #[error("resource {0} is not checked out from this pool")]
    NotInUse(ResourceId),

    /// The model failed to reset; it stays checked out
    #[error("failed to reset resource {id}: {source}")]
    ResourceResetFailed {
        /// The resource whose reset failed
        id: ResourceId,

        /// The underlying model failure
        #[source]
        source: ModelError,
    },

    /// A blocking `get` gave up waiting
    #[error("timeout after {0:?} waiting for resource")]
    Timeout(Duration),

    /// The pool is shut down
    #[error("resource pool is shut down")]
    PoolShutdown,
}

/// Errors raised by a model implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An underlying remote handle can no longer be reached
    #[error("model backend unreachable: {0}")]
    Unreachable(String),
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    /// The configuration file is not valid TOML for a pool config
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The configuration parsed but holds invalid values
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type used throughout Reservoir.
pub type Result<T> = std::result::Result<T, Error>;
