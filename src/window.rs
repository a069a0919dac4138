//! Sliding-window error evaluation.
//!
//! The window error of a run is
//! `max over 0 <= s <= t <= n of | sum_{i=s}^{t-1} (x_i / q - y_i) |`.
//! Working in q-units turns every term into the integer `x_i - q * y_i`, so
//! the error is computed exactly as a fraction over `q`. The maximum over all
//! windows of `|P[t] - P[s]|` on the prefix sums `P` is simply
//! `max(P) - min(P)`, which keeps evaluation linear.

use std::fmt;

use tracing::debug;

use crate::{CarryLimiter, QuantaFlowError, Result, Uint};

/// Exact window error expressed as `numerator / granularity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowError {
    /// Deviation in q-units.
    pub numerator: u128,
    pub granularity: Uint,
}

impl WindowError {
    /// Returns the error as a real number of tokens.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.granularity as f64
    }

    /// Returns `true` if the error does not exceed `cap * (1 - 1/q)`.
    ///
    /// The comparison is done in integers: `numerator <= cap * (q - 1)`.
    pub fn within_bound(&self, cap: Uint) -> bool {
        let limit = (cap as u128).saturating_mul((self.granularity as u128).saturating_sub(1));
        self.numerator <= limit
    }
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.as_f64())
    }
}

/// Feeds a plan through the limiter tick by tick and collects the emissions.
///
/// Stops at the first rejected value; the steps already applied stay applied.
pub fn drive(limiter: &mut CarryLimiter, plan: &[Uint]) -> Result<Vec<Uint>> {
    plan.iter().map(|&demand| limiter.step(demand)).collect()
}

/// Computes the maximum window error between a demand plan and its emissions.
///
/// # Errors
///
/// Returns [`QuantaFlowError::LengthMismatch`] if the sequences differ in length,
/// and [`QuantaFlowError::EvaluationOverflow`] if a running sum leaves the
/// 128-bit range used for exact evaluation.
///
/// # Example
///
/// ```rust
/// use quantaflow::CarryLimiter;
/// use quantaflow::window::{drive, max_window_error};
///
/// let plan = [0, 1, 1, 1];
/// let mut limiter = CarryLimiter::new(4).unwrap();
/// let emitted = drive(&mut limiter, &plan).unwrap();
///
/// let error = max_window_error(&plan, &emitted, 4).unwrap();
/// assert_eq!(error.numerator, 3);
/// assert!((error.as_f64() - 0.75).abs() < 1e-9);
/// ```
pub fn max_window_error(demand: &[Uint], emitted: &[Uint], granularity: Uint) -> Result<WindowError> {
    if demand.len() != emitted.len() {
        return Err(QuantaFlowError::LengthMismatch {
            demand: demand.len(),
            emitted: emitted.len(),
        });
    }

    let overflow = |tick: usize| QuantaFlowError::EvaluationOverflow { tick };
    let q = i128::try_from(granularity).map_err(|_| overflow(0))?;
    let mut prefix: i128 = 0;
    let mut lowest: i128 = 0;
    let mut highest: i128 = 0;
    for (tick, (&x, &y)) in demand.iter().zip(emitted).enumerate() {
        let x = i128::try_from(x).map_err(|_| overflow(tick))?;
        let owed = i128::try_from(y)
            .ok()
            .and_then(|y| q.checked_mul(y))
            .ok_or_else(|| overflow(tick))?;
        prefix = x
            .checked_sub(owed)
            .and_then(|delta| prefix.checked_add(delta))
            .ok_or_else(|| overflow(tick))?;
        lowest = lowest.min(prefix);
        highest = highest.max(prefix);
    }

    // highest >= 0 >= lowest, so the spread is their magnitudes added.
    let numerator = highest
        .unsigned_abs()
        .checked_add(lowest.unsigned_abs())
        .ok_or_else(|| overflow(demand.len()))?;
    let error = WindowError {
        numerator,
        granularity,
    };
    debug!(ticks = demand.len(), error = %error, "window error evaluated");
    Ok(error)
}

/// Theoretical worst-case window error `cap * (1 - 1/q)`.
pub fn theoretical_bound(granularity: Uint, cap: Uint) -> f64 {
    cap as f64 * (1.0 - 1.0 / granularity as f64)
}
