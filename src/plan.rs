//! Scaled demand plans for driving a limiter.
//!
//! A plan is an ordered sequence of integers in `[0, granularity]`, one per
//! tick. The scenarios here are the standard workloads used to exercise the
//! window-error bound: a smooth daily wave, periodic bursts, a sparse
//! alternating pattern, and seeded uniform noise.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{QuantaFlowError, Uint};

/// Period of the diurnal wave, in ticks.
const DIURNAL_PERIOD: f64 = 100.0;
/// Fraction of the granularity the diurnal wave oscillates around.
const DIURNAL_BASE: f64 = 0.4;
/// Spiky scenario repeats every this many ticks.
const SPIKE_PERIOD: usize = 40;
/// Number of full-demand ticks at the start of each spike period.
const SPIKE_WIDTH: usize = 5;

/// Named plan-generation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scenario {
    /// Sine wave around `0.4 * q` with period 100 ticks.
    #[default]
    Diurnal,
    /// `q` for the first 5 ticks of every 40, zero otherwise.
    Spiky,
    /// `1` on odd ticks, `0` on even ticks.
    Saw,
    /// Uniform values in `[0, q]` from a seeded generator.
    Random,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Diurnal,
        Scenario::Spiky,
        Scenario::Saw,
        Scenario::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Diurnal => "diurnal",
            Scenario::Spiky => "spiky",
            Scenario::Saw => "saw",
            Scenario::Random => "rand",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = QuantaFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                QuantaFlowError::invalid_config(format!(
                    "unknown scenario `{s}` (expected one of diurnal, spiky, saw, rand)"
                ))
            })
    }
}

/// Parameters for [`generate_plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlanConfig {
    /// Number of ticks to generate.
    pub ticks: usize,
    /// Granularity the values are scaled by.
    pub granularity: Uint,
    pub scenario: Scenario,
    /// Diurnal amplitude as a fraction of the granularity.
    pub amplitude: f64,
    /// Seed for the `rand` scenario.
    pub seed: u64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            ticks: 200,
            granularity: 10,
            scenario: Scenario::Diurnal,
            amplitude: 0.3,
            seed: 7,
        }
    }
}

/// Generates a plan of scaled demand values, each in `[0, granularity]`.
///
/// Generation is deterministic: the same config always yields the same plan.
///
/// # Example
///
/// ```rust
/// use quantaflow::plan::{generate_plan, PlanConfig, Scenario};
///
/// let plan = generate_plan(&PlanConfig {
///     ticks: 6,
///     scenario: Scenario::Saw,
///     ..PlanConfig::default()
/// });
/// assert_eq!(plan, vec![0, 1, 0, 1, 0, 1]);
/// ```
pub fn generate_plan(config: &PlanConfig) -> Vec<Uint> {
    let q = config.granularity;
    match config.scenario {
        Scenario::Diurnal => {
            let base = (DIURNAL_BASE * q as f64) as i128;
            let amplitude = (config.amplitude * q as f64) as i128;
            (0..config.ticks)
                .map(|i| {
                    let phase = (2.0 * PI * i as f64 / DIURNAL_PERIOD).sin();
                    let value = base + (amplitude as f64 * phase) as i128;
                    value.clamp(0, q as i128) as Uint
                })
                .collect()
        }
        Scenario::Spiky => (0..config.ticks)
            .map(|i| if i % SPIKE_PERIOD < SPIKE_WIDTH { q } else { 0 })
            .collect(),
        Scenario::Saw => (0..config.ticks)
            .map(|i| if i % 2 == 1 { 1.min(q) } else { 0 })
            .collect(),
        Scenario::Random => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            (0..config.ticks).map(|_| rng.random_range(0..=q)).collect()
        }
    }
}
