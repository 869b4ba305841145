//! A stateless model that adds a fixed per-position shift to its inputs.

use std::thread;
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ModelError;
use crate::traits::Model;

/// Number of shift coefficients each model carries.
pub const SHIFT_LEN: usize = 10;

/// Inclusive bound for each shift coefficient.
pub const SHIFT_BOUND: i64 = 10;

/// Shift model: `predict(x)[i] = x[i] + shift[i % SHIFT_LEN]`.
///
/// The addition wraps on overflow, so inputs near `i64::MAX` or `i64::MIN`
/// come back wrapped rather than panicking. The coefficients are drawn from `[-SHIFT_BOUND, SHIFT_BOUND]` with a
/// seeded RNG, so two models built from the same seed behave identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleModel {
    shift: Vec<i64>,
}

impl SampleModel {
    /// Build a model from `seed` without any load delay.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let shift = (0..SHIFT_LEN)
            .map(|_| rng.gen_range(-SHIFT_BOUND..=SHIFT_BOUND))
            .collect();
        Self { shift }
    }

    /// Build a model from `seed`, blocking for `init_delay` to stand in for
    /// fetching the weights from a remote server.
    pub fn load(seed: u64, init_delay: Duration) -> Self {
        let model = Self::seeded(seed);
        if !init_delay.is_zero() {
            debug!("Simulating {:?} model load for seed {}", init_delay, seed);
            thread::sleep(init_delay);
        }
        model
    }

    /// The shift coefficients.
    pub fn shift(&self) -> &[i64] {
        &self.shift
    }
}

impl Model for SampleModel {
    type Input = i64;
    type Output = i64;

    fn predict(&mut self, inputs: &[i64]) -> Vec<i64> {
        inputs
            .iter()
            .enumerate()
            .map(|(i, x)| x.wrapping_add(self.shift[i % self.shift.len()]))
            .collect()
    }

    fn reset(&mut self) -> Result<(), ModelError> {
        // Stateless.
        Ok(())
    }
}
