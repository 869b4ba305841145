//! Concrete models.
//!
//! - [`SampleModel`]: a stateless shift model with a seeded, simulated slow load
//! - [`CountingModel`]: a stateful model whose outputs drift until it is reset

pub mod counting;
pub mod sample;

pub use counting::CountingModel;
pub use sample::SampleModel;
