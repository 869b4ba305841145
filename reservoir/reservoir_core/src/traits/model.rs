//! Model capability interface.
//!
//! A model is something that runs predictions. Models are expensive to
//! create (loading one may mean a round trip to a remote server) but cheap
//! to run, which is what makes them worth pooling.

use crate::error::ModelError;

/// A poolable unit of capability.
///
/// Implementations are created outside the pool and handed to it already
/// initialized. The pool calls [`reset`](Model::reset) every time a model is
/// released, before any other caller can check it out again.
pub trait Model: Send + 'static {
    /// Element type accepted by [`predict`](Model::predict).
    type Input;

    /// Element type produced by [`predict`](Model::predict).
    type Output;

    /// Run an inference over `inputs`.
    ///
    /// The result depends only on the model's current state and `inputs`.
    /// Unless an implementation documents otherwise it yields exactly one
    /// output per input.
    fn predict(&mut self, inputs: &[Self::Input]) -> Vec<Self::Output>;

    /// Restore the state the model had right after construction.
    ///
    /// Must be idempotent. Only fails when something the model depends on
    /// is unrecoverable.
    fn reset(&mut self) -> Result<(), ModelError>;

    /// Human-readable name used in log lines.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("model")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler;

    impl Model for Doubler {
        type Input = i64;
        type Output = i64;

        fn predict(&mut self, inputs: &[i64]) -> Vec<i64> {
            inputs.iter().map(|x| x * 2).collect()
        }

        fn reset(&mut self) -> Result<(), ModelError> {
            Ok(())
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert_eq!(Doubler.name(), "Doubler");
    }

    #[test]
    fn test_predict_is_length_preserving() {
        let mut model = Doubler;
        assert_eq!(model.predict(&[1, 2, 3]), vec![2, 4, 6]);
        assert!(model.predict(&[]).is_empty());
    }
}
