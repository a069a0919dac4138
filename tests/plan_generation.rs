use quantaflow::plan::{generate_plan, PlanConfig, Scenario};
use quantaflow::Uint;

fn plan(scenario: Scenario, granularity: Uint, seed: u64) -> Vec<Uint> {
    generate_plan(&PlanConfig {
        ticks: 300,
        granularity,
        scenario,
        amplitude: 0.3,
        seed,
    })
}

#[test]
fn every_scenario_stays_in_range() {
    for scenario in Scenario::ALL {
        for q in [2, 10, 1000] {
            let values = plan(scenario, q, 7);
            assert_eq!(values.len(), 300);
            assert!(values.iter().all(|&x| x <= q), "{scenario} exceeded q={q}");
        }
    }
}

#[test]
fn random_plan_is_seeded() {
    assert_eq!(plan(Scenario::Random, 10, 42), plan(Scenario::Random, 10, 42));
    assert_ne!(plan(Scenario::Random, 10, 1), plan(Scenario::Random, 10, 2));
}

#[test]
fn random_plan_covers_both_ends() {
    let values = plan(Scenario::Random, 4, 3);
    assert!(values.contains(&0));
    assert!(values.contains(&4));
}

#[test]
fn deterministic_scenarios_ignore_seed() {
    for scenario in [Scenario::Diurnal, Scenario::Spiky, Scenario::Saw] {
        assert_eq!(plan(scenario, 10, 1), plan(scenario, 10, 99));
    }
}

#[test]
fn saw_alternates() {
    let values = plan(Scenario::Saw, 10, 0);
    for (i, &x) in values.iter().enumerate() {
        assert_eq!(x, (i % 2) as Uint);
    }
}

#[test]
fn default_config_matches_simulator_defaults() {
    let config = PlanConfig::default();
    assert_eq!(config.ticks, 200);
    assert_eq!(config.granularity, 10);
    assert_eq!(config.scenario, Scenario::Diurnal);
    assert_eq!(config.seed, 7);
    assert!("RAND".parse::<Scenario>().is_ok());
}
