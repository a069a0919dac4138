//! error.rs
//! Defines the error and result types shared by the limiter and its tooling.

use crate::types::Uint;

/// Error type for every fallible operation in the crate.
///
/// Variants carry enough diagnostic information to be logged directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantaFlowError {
    /// The limiter cannot be built with the requested parameters.
    #[error("Invalid configuration: {reason}.")]
    InvalidConfiguration { reason: String },

    /// A scaled demand value falls outside `[0, cap * granularity]`.
    ///
    /// The limiter state is left exactly as it was before the call.
    #[error("Scaled demand {demand} is out of range: expected a value in [0, {max}].")]
    OutOfRange { demand: Uint, max: Uint },

    /// A per-call emission cap is zero, or `cap * granularity` does not fit in [`Uint`].
    ///
    /// The limiter state is left exactly as it was before the call.
    #[error("Emission cap {cap} is unusable with granularity {granularity}: it must be at least 1 and cap * granularity must fit the integer type.")]
    InvalidCap { cap: Uint, granularity: Uint },

    /// A shared limiter is held by another caller.
    #[error("Contention failure: limiter is locked by another operation. Please retry.")]
    ContentionFailure,

    /// Demand and emission sequences passed to the evaluator differ in length.
    #[error("Length mismatch: {demand} demand value(s) but {emitted} emission count(s).")]
    LengthMismatch { demand: usize, emitted: usize },

    /// The window error of a run does not fit the evaluator's 128-bit arithmetic.
    #[error("Window error overflow at tick {tick}: values too large to evaluate exactly.")]
    EvaluationOverflow { tick: usize },
}

impl QuantaFlowError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, QuantaFlowError>;
