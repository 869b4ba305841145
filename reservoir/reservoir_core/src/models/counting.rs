//! A stateful model used to exercise the reset contract.

use crate::error::ModelError;
use crate::traits::Model;

/// Model whose outputs depend on how many times it has been called.
///
/// `predict(x)[i] = x[i] + calls`, where `calls` is the number of earlier
/// `predict` calls since construction or the last reset. Both the offset
/// and the call counter wrap on overflow. A model that is
/// handed back to a pool without being reset therefore leaks state into
/// the next caller's results.
#[derive(Debug, Default)]
pub struct CountingModel {
    calls: i64,
    fail_next_reset: bool,
}

impl CountingModel {
    /// Create a model with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `predict` calls since construction or the last reset.
    pub fn calls(&self) -> i64 {
        self.calls
    }

    /// Make the next `reset` fail as if the model's backend were gone.
    pub fn fail_next_reset(&mut self) {
        self.fail_next_reset = true;
    }
}

impl Model for CountingModel {
    type Input = i64;
    type Output = i64;

    fn predict(&mut self, inputs: &[i64]) -> Vec<i64> {
        let offset = self.calls;
        self.calls = self.calls.wrapping_add(1);
        inputs.iter().map(|x| x.wrapping_add(offset)).collect()
    }

    fn reset(&mut self) -> Result<(), ModelError> {
        if std::mem::take(&mut self.fail_next_reset) {
            return Err(ModelError::Unreachable(
                "lost connection to model server".to_string(),
            ));
        }
        self.calls = 0;
        Ok(())
    }
}
