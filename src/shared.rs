use std::sync::Mutex;

use crate::{CarryLimiter, QuantaFlowError, Result, Uint};

/// Thread-safe wrapper around a [`CarryLimiter`].
///
/// A limiter is meant to be owned by exactly one flow. When an application
/// genuinely has to share one between threads, this wrapper serializes access
/// with a non-blocking lock: if the lock cannot be acquired immediately the
/// call fails with [`QuantaFlowError::ContentionFailure`] and the remainder is
/// not touched.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use quantaflow::SharedCarryLimiter;
///
/// let limiter = Arc::new(SharedCarryLimiter::new(10).unwrap());
/// assert_eq!(limiter.step(6), Ok(0));
/// assert_eq!(limiter.step(6), Ok(1));
/// assert_eq!(limiter.remainder(), Ok(2));
/// ```
#[derive(Debug)]
pub struct SharedCarryLimiter {
    granularity: Uint,
    inner: Mutex<CarryLimiter>,
}

impl SharedCarryLimiter {
    /// Creates a shared single-emit limiter.
    pub fn new(granularity: Uint) -> Result<Self> {
        CarryLimiter::new(granularity).map(Self::from)
    }

    /// Attempts to feed one tick of scaled demand with the configured cap.
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Tokens to emit this tick.
    /// * `Err(QuantaFlowError::OutOfRange)` - Demand rejected; state unchanged.
    /// * `Err(QuantaFlowError::ContentionFailure)` - Unable to acquire the internal lock.
    #[inline]
    pub fn step(&self, scaled_demand: Uint) -> Result<Uint> {
        let mut limiter = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Err(QuantaFlowError::ContentionFailure),
        };
        limiter.step(scaled_demand)
    }

    /// Attempts to feed one tick of scaled demand, discharging at most `cap` times.
    #[inline]
    pub fn step_capped(&self, scaled_demand: Uint, cap: Uint) -> Result<Uint> {
        let mut limiter = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Err(QuantaFlowError::ContentionFailure),
        };
        limiter.step_capped(scaled_demand, cap)
    }

    /// Clears the remainder.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Remainder is now 0.
    /// * `Err(QuantaFlowError::ContentionFailure)` - Unable to acquire the internal lock.
    pub fn reset(&self) -> Result<()> {
        let mut limiter = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Err(QuantaFlowError::ContentionFailure),
        };
        limiter.reset();
        Ok(())
    }

    /// Reads the current remainder.
    pub fn remainder(&self) -> Result<Uint> {
        let limiter = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Err(QuantaFlowError::ContentionFailure),
        };
        Ok(limiter.remainder())
    }

    /// Returns the configured granularity without taking the lock.
    #[inline(always)]
    pub fn granularity(&self) -> Uint {
        self.granularity
    }

    /// Unwraps the inner limiter.
    ///
    /// A poisoned lock cannot leave a half-applied step behind, so the inner
    /// value is recovered in that case too.
    pub fn into_inner(self) -> CarryLimiter {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<CarryLimiter> for SharedCarryLimiter {
    fn from(limiter: CarryLimiter) -> Self {
        SharedCarryLimiter {
            granularity: limiter.granularity(),
            inner: Mutex::new(limiter),
        }
    }
}
