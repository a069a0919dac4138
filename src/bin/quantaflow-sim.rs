use anyhow::{Context, Result};
use clap::Parser;
use quantaflow::plan::{generate_plan, PlanConfig, Scenario};
use quantaflow::window::{drive, max_window_error, theoretical_bound};
use quantaflow::{logging, CarryLimiter, Uint};

/// QuantaFlow simulator (sliding-window fairness limiter).
#[derive(Parser)]
#[command(about, long_about, version)]
struct Cli {
    /// Granularity (e.g. 10 -> tenths)
    #[arg(long, default_value_t = 10)]
    q: Uint,

    /// Number of time steps
    #[arg(long, default_value_t = 200)]
    ticks: usize,

    /// Plan generation scenario: diurnal, spiky, saw or rand
    #[arg(long, default_value_t = Scenario::Diurnal)]
    scenario: Scenario,

    /// Amplitude for the diurnal scenario (0.0-1.0-ish)
    #[arg(long, default_value_t = 0.3)]
    amp: f64,

    /// Random seed
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Maximum tokens emitted per tick
    #[arg(long, default_value_t = 1)]
    cap: Uint,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    let mut limiter = CarryLimiter::with_cap(cli.q, cli.cap).context("failed to build limiter")?;
    let plan = generate_plan(&PlanConfig {
        ticks: cli.ticks,
        granularity: cli.q,
        scenario: cli.scenario,
        amplitude: cli.amp,
        seed: cli.seed,
    });
    tracing::info!(
        q = cli.q,
        cap = cli.cap,
        ticks = cli.ticks,
        scenario = %cli.scenario,
        "running simulation"
    );

    let emitted = drive(&mut limiter, &plan).context("limiter rejected the generated plan")?;
    let error = max_window_error(&plan, &emitted, cli.q)?;
    let bound = theoretical_bound(cli.q, cli.cap);

    if !error.within_bound(cli.cap) {
        tracing::warn!(error = %error, bound, "window error exceeds theoretical bound");
    }

    println!("QuantaFlow simulation");
    println!("  q           = {}", cli.q);
    println!("  ticks       = {}", cli.ticks);
    println!("  scenario    = {}", cli.scenario);
    println!("  max window error = {error}");
    println!("  theory bound     = {bound:.6}");

    Ok(())
}
