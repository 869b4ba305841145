//! Capability interfaces implemented by pooled resources.

pub mod model;

pub use model::Model;
