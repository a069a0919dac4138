//! Integer carry-rule limiter with a tight sliding-window fairness bound.
//!
//! A [`CarryLimiter`] turns a stream of fractional demand, expressed as
//! integers over a fixed granularity `q`, into a stream of whole-token
//! emissions. Over any contiguous run of ticks the emitted total never
//! deviates from the requested total by more than `1 - 1/q` tokens, and that
//! bound is reached by some inputs.
//!
//! # Quick Start
//!
//! ```rust
//! use quantaflow::{CarryLimiter, Uint};
//!
//! // q = 10: demand is given in tenths of a token per tick.
//! let mut limiter = CarryLimiter::new(10).unwrap();
//!
//! let plan = [0, 3, 0, 1, 2, 0, 0, 1, 0, 2];
//! let emitted: Vec<_> = plan.iter().map(|&x| limiter.step(x).unwrap()).collect();
//! assert_eq!(emitted.iter().sum::<Uint>(), 0);
//! assert_eq!(limiter.remainder(), 9);
//! ```
//!
//! # Core Concepts
//!
//! ## Fixed-point demand
//! A real rate `r` in `[0, 1]` is passed as `round(r * q)`. The limiter keeps
//! the undischarged part as an integer remainder in `[0, q)`, so no rounding
//! error is ever carried from one tick to the next.
//!
//! ## Capped multi-emit
//! [`CarryLimiter::step_capped`] (or a limiter built with
//! [`CarryLimiter::with_cap`]) accepts up to `M * q` per tick and emits up to
//! `M` tokens. The window bound scales to `M * (1 - 1/q)`.
//!
//! ## Error Handling
//! All fallible operations return [`Result`] with a [`QuantaFlowError`]:
//! - **[`InvalidConfiguration`](QuantaFlowError::InvalidConfiguration)** - Granularity below 2 or a zero cap
//! - **[`OutOfRange`](QuantaFlowError::OutOfRange)** - Demand outside `[0, M * q]`; state is untouched
//! - **[`InvalidCap`](QuantaFlowError::InvalidCap)** - A per-call cap of zero, or one whose `cap * q` overflows
//! - **[`ContentionFailure`](QuantaFlowError::ContentionFailure)** - A [`SharedCarryLimiter`] is busy
//! - **[`LengthMismatch`](QuantaFlowError::LengthMismatch)** - Evaluator inputs differ in length
//! - **[`EvaluationOverflow`](QuantaFlowError::EvaluationOverflow)** - Evaluator values too large for exact arithmetic
//!
//! ## Thread Safety
//! [`CarryLimiter`] is a plain value mutated through `&mut self`; give each
//! flow its own instance. [`SharedCarryLimiter`] wraps one behind a
//! non-blocking lock for the cases where sharing cannot be avoided.
//!
//! # Tooling
//!
//! - [`plan`] - scenario-based demand generation
//! - [`window`] - exact window-error evaluation and the theoretical bound

pub mod error;
pub mod limiter;
pub mod plan;
pub mod shared;
pub mod types;
pub mod window;

#[cfg(feature = "sim")]
pub mod logging;

pub use error::{QuantaFlowError, Result};
pub use limiter::{CarryLimiter, CarryLimiterConfig};
pub use shared::SharedCarryLimiter;
pub use types::Uint;
