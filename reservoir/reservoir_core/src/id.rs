//! Strongly-typed identifiers.
//!
//! Each identifier type is a thin wrapper around a UUID with a phantom type
//! parameter, so a `ResourceId` can never be passed where a `PoolId` is
//! expected.
//!
//! # Examples
//!
//! ```
//! use reservoir_core::id::{PoolId, ResourceId};
//! use std::str::FromStr;
//!
//! let resource_id = ResourceId::new();
//! let pool_id = PoolId::new();
//! assert_ne!(resource_id.to_string(), pool_id.to_string());
//!
//! let id_str = "550e8400-e29b-41d4-a716-446655440000";
//! let resource_id = ResourceId::from_str(id_str).unwrap();
//! assert_eq!(resource_id.to_string(), id_str);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe identifier based on UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create an identifier from a specific UUID.
    ///
    /// # Examples
    ///
    /// ```
    /// use reservoir_core::id::ResourceId;
    /// use uuid::Uuid;
    ///
    /// let uuid = Uuid::new_v4();
    /// let id = ResourceId::from_uuid(uuid);
    /// assert_eq!(id.uuid(), uuid);
    /// ```
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Short form used in log lines: the first eight hex digits.
    pub fn short(&self) -> String {
        let mut s = self.uuid.simple().to_string();
        s.truncate(8);
        s
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

/// Marker type for pooled resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceMarker;
/// Identity tag the pool assigns to a resource when it is added.
pub type ResourceId = Id<ResourceMarker>;

/// Marker type for pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolMarker;
/// Identifier for a pool instance.
pub type PoolId = Id<PoolMarker>;
