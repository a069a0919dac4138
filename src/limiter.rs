use tracing::{debug, trace};

use crate::{QuantaFlowError, Result, Uint};

/// Core implementation of the fixed-point carry rule.
///
/// The limiter keeps an integer remainder `E` that records demand which has
/// been requested but not yet emitted. Each tick adds the scaled demand to the
/// remainder and discharges whole units of `granularity` as emitted tokens.
/// Because `E` is always brought back under `granularity`, the gap between the
/// ideal real-valued output and the emitted count is exactly `E / granularity`
/// at every tick, and over any contiguous window of ticks the deviation never
/// exceeds `cap * (1 - 1/granularity)`.
///
/// # Algorithm Behavior
///
/// - The remainder starts at 0 and satisfies `0 <= E < granularity` between calls.
/// - `step` adds the demand, then discharges at most `cap` times.
/// - Demand above `cap * granularity` is rejected and leaves the state untouched.
/// - Only integer arithmetic is used, so no error leaks across ticks.
///
/// # Example
///
/// ```rust
/// use quantaflow::CarryLimiter;
///
/// // Tenths: a demand of 3 means 0.3 tokens this tick.
/// let mut limiter = CarryLimiter::new(10).unwrap();
///
/// assert_eq!(limiter.step(3), Ok(0));
/// assert_eq!(limiter.step(3), Ok(0));
/// assert_eq!(limiter.step(3), Ok(0));
/// assert_eq!(limiter.step(3), Ok(1)); // 1.2 requested so far, one token out
/// assert_eq!(limiter.remainder(), 2);
///
/// // Demand above the granularity is refused.
/// assert!(limiter.step(11).is_err());
/// assert_eq!(limiter.remainder(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarryLimiter {
    /// Fixed-point scale: a demand of `granularity` is one whole token.
    granularity: Uint,
    /// Maximum number of tokens `step` may emit in a single tick.
    emission_cap: Uint,
    /// Undischarged demand, always in `[0, granularity)` between calls.
    remainder: Uint,
}

impl CarryLimiter {
    /// Creates a single-emit limiter with the given granularity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantaFlowError::InvalidConfiguration`] if `granularity < 2`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quantaflow::CarryLimiter;
    ///
    /// let limiter = CarryLimiter::new(20).unwrap();
    /// assert_eq!(limiter.granularity(), 20);
    /// assert_eq!(limiter.remainder(), 0);
    ///
    /// assert!(CarryLimiter::new(1).is_err());
    /// ```
    pub fn new(granularity: Uint) -> Result<Self> {
        Self::with_cap(granularity, 1)
    }

    /// Creates a limiter that may emit up to `emission_cap` tokens per tick.
    ///
    /// # Errors
    ///
    /// Returns [`QuantaFlowError::InvalidConfiguration`] if `granularity < 2`,
    /// if `emission_cap` is zero, or if `emission_cap * granularity` does not
    /// fit in [`Uint`].
    pub fn with_cap(granularity: Uint, emission_cap: Uint) -> Result<Self> {
        if granularity < 2 {
            return Err(QuantaFlowError::invalid_config(format!(
                "granularity must be at least 2 (got {granularity})"
            )));
        }
        if emission_cap == 0 {
            return Err(QuantaFlowError::invalid_config(
                "emission_cap must be greater than 0",
            ));
        }
        if emission_cap.checked_mul(granularity).is_none() {
            return Err(QuantaFlowError::invalid_config(format!(
                "emission_cap {emission_cap} times granularity {granularity} overflows"
            )));
        }

        Ok(CarryLimiter {
            granularity,
            emission_cap,
            remainder: 0,
        })
    }

    /// Feeds one tick of scaled demand using the configured emission cap.
    ///
    /// With the default cap of 1 the accepted range is `[0, granularity]` and
    /// the result is either 0 or 1.
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of tokens to emit this tick.
    /// * `Err(QuantaFlowError::OutOfRange)` - Demand above `cap * granularity`; state unchanged.
    #[inline]
    pub fn step(&mut self, scaled_demand: Uint) -> Result<Uint> {
        self.step_capped(scaled_demand, self.emission_cap)
    }

    /// Feeds one tick of scaled demand, discharging at most `cap` times.
    ///
    /// This lets a caller plan several ticks' worth of demand into one step.
    /// The accepted range is `[0, cap * granularity]` and the window error
    /// bound scales to `cap * (1 - 1/granularity)`.
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of tokens to emit this tick, at most `cap`.
    /// * `Err(QuantaFlowError::InvalidCap)` - `cap` is zero or `cap * granularity`
    ///   overflows. State unchanged.
    /// * `Err(QuantaFlowError::OutOfRange)` - Demand exceeds `cap * granularity`. State unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quantaflow::CarryLimiter;
    ///
    /// let mut limiter = CarryLimiter::new(10).unwrap();
    /// assert_eq!(limiter.step_capped(25, 3), Ok(2));
    /// assert_eq!(limiter.remainder(), 5);
    /// assert!(limiter.step_capped(31, 3).is_err());
    /// ```
    pub fn step_capped(&mut self, scaled_demand: Uint, cap: Uint) -> Result<Uint> {
        let max = match cap.checked_mul(self.granularity) {
            Some(max) if cap > 0 => max,
            _ => {
                debug!(
                    demand = scaled_demand,
                    cap,
                    granularity = self.granularity,
                    "rejected step: unusable emission cap"
                );
                return Err(QuantaFlowError::InvalidCap {
                    cap,
                    granularity: self.granularity,
                });
            }
        };

        if scaled_demand > max {
            debug!(
                demand = scaled_demand,
                max,
                remainder = self.remainder,
                "rejected step: demand out of range"
            );
            return Err(QuantaFlowError::OutOfRange {
                demand: scaled_demand,
                max,
            });
        }

        // Whole units discharge directly; only the fractional part touches the
        // remainder, so nothing here can overflow even at demand == cap * q.
        let mut emitted = scaled_demand / self.granularity;
        let fraction = scaled_demand % self.granularity;
        let headroom = self.granularity - self.remainder;
        let carry = if fraction >= headroom {
            emitted += 1;
            fraction - headroom
        } else {
            self.remainder + fraction
        };
        // remainder + demand < (cap + 1) * q, so at most cap discharges happen.
        debug_assert!(emitted <= cap);
        debug_assert!(carry < self.granularity);

        trace!(
            demand = scaled_demand,
            emitted,
            remainder = carry,
            "carry step"
        );
        self.remainder = carry;
        Ok(emitted)
    }

    /// Clears the remainder so fairness accounting restarts from zero.
    ///
    /// The granularity and emission cap are kept.
    #[inline]
    pub fn reset(&mut self) {
        if self.remainder != 0 {
            debug!(discarded = self.remainder, "limiter reset");
        }
        self.remainder = 0;
    }

    /// Returns the configured granularity.
    #[inline(always)]
    pub fn granularity(&self) -> Uint {
        self.granularity
    }

    /// Returns the configured per-tick emission cap used by [`step`](Self::step).
    #[inline(always)]
    pub fn emission_cap(&self) -> Uint {
        self.emission_cap
    }

    /// Returns the current undischarged demand, in `[0, granularity)`.
    #[inline(always)]
    pub fn remainder(&self) -> Uint {
        self.remainder
    }
}

/// Configuration structure for creating a `CarryLimiter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarryLimiterConfig {
    /// Fixed-point scale of the demand values.
    pub granularity: Uint,
    /// Maximum tokens emitted per tick.
    pub emission_cap: Uint,
}

impl CarryLimiterConfig {
    /// Creates a single-emit configuration.
    pub fn new(granularity: Uint) -> Self {
        Self {
            granularity,
            emission_cap: 1,
        }
    }

    /// Sets the per-tick emission cap.
    pub fn emission_cap(mut self, emission_cap: Uint) -> Self {
        self.emission_cap = emission_cap;
        self
    }
}

impl TryFrom<CarryLimiterConfig> for CarryLimiter {
    type Error = QuantaFlowError;

    /// Converts a `CarryLimiterConfig` into a `CarryLimiter`.
    ///
    /// ```
    /// use quantaflow::{CarryLimiter, CarryLimiterConfig};
    ///
    /// let limiter = CarryLimiter::try_from(CarryLimiterConfig::new(10).emission_cap(3)).unwrap();
    /// assert_eq!(limiter.emission_cap(), 3);
    ///
    /// let bad: Result<CarryLimiter, _> = CarryLimiterConfig::new(0).try_into();
    /// assert!(bad.is_err());
    /// ```
    fn try_from(config: CarryLimiterConfig) -> Result<Self> {
        CarryLimiter::with_cap(config.granularity, config.emission_cap)
    }
}
