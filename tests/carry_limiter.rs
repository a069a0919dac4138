use quantaflow::{CarryLimiter, CarryLimiterConfig, QuantaFlowError, Uint};

fn new_limiter(q: Uint) -> CarryLimiter {
    CarryLimiter::new(q).unwrap()
}

fn run(limiter: &mut CarryLimiter, plan: &[Uint]) -> Vec<Uint> {
    plan.iter().map(|&x| limiter.step(x).unwrap()).collect()
}

#[test]
fn new_limiter_starts_empty() {
    let limiter = new_limiter(10);
    assert_eq!(limiter.granularity(), 10);
    assert_eq!(limiter.emission_cap(), 1);
    assert_eq!(limiter.remainder(), 0);
}

#[test]
fn granularity_below_two_is_invalid() {
    for q in [0, 1] {
        match CarryLimiter::new(q) {
            Err(QuantaFlowError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("granularity"));
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }
    assert!(CarryLimiter::new(2).is_ok());
}

#[test]
fn zero_cap_is_invalid() {
    assert!(matches!(
        CarryLimiter::with_cap(10, 0),
        Err(QuantaFlowError::InvalidConfiguration { .. })
    ));
    let from_config: Result<CarryLimiter, _> = CarryLimiterConfig::new(10).emission_cap(0).try_into();
    assert!(from_config.is_err());
}

#[test]
fn zero_demand_never_emits() {
    let mut limiter = new_limiter(10);
    for _ in 0..50 {
        assert_eq!(limiter.step(0), Ok(0));
    }
    assert_eq!(limiter.remainder(), 0);
}

#[test]
fn emission_follows_carry() {
    let mut limiter = new_limiter(10);
    // 0.4 per tick: carries 4, 8, 12->2, 6, 10->0
    assert_eq!(run(&mut limiter, &[4, 4, 4, 4, 4]), vec![0, 0, 1, 0, 1]);
    assert_eq!(limiter.remainder(), 0);
}

#[test]
fn remainder_stays_below_granularity() {
    let mut limiter = new_limiter(7);
    for x in (0..=7).cycle().take(200) {
        let y = limiter.step(x).unwrap();
        assert!(y <= 1);
        assert!(limiter.remainder() < 7);
    }
}

#[test]
fn demand_above_granularity_is_out_of_range() {
    let mut limiter = new_limiter(10);
    assert_eq!(limiter.step(7), Ok(0));

    let result = limiter.step(11);
    match result {
        Err(QuantaFlowError::OutOfRange { demand, max }) => {
            assert_eq!(demand, 11);
            assert_eq!(max, 10);
        }
        _ => panic!("Expected OutOfRange error"),
    }
    assert_eq!(limiter.remainder(), 7);
}

#[test]
fn rejected_step_leaves_behavior_unchanged() {
    let plan = [3, 9, 1, 10, 5, 5, 2, 8];

    let mut clean = new_limiter(10);
    let expected = run(&mut clean, &plan);

    let mut noisy = new_limiter(10);
    let mut actual = Vec::new();
    for &x in &plan {
        assert!(noisy.step(Uint::MAX).is_err());
        assert!(noisy.step(11).is_err());
        actual.push(noisy.step(x).unwrap());
    }

    assert_eq!(actual, expected);
    assert_eq!(noisy, clean);
}

#[test]
fn reset_on_fresh_limiter_is_noop() {
    let mut limiter = new_limiter(10);
    limiter.reset();
    assert_eq!(limiter, new_limiter(10));
}

#[test]
fn reset_restores_fresh_behavior() {
    let plan = [6, 6, 3, 9, 1, 0, 10, 4];

    let mut used = new_limiter(10);
    run(&mut used, &[3, 3, 3, 7, 8]);
    assert_ne!(used.remainder(), 0);
    used.reset();
    assert_eq!(used.remainder(), 0);
    assert_eq!(used.granularity(), 10);

    let mut fresh = new_limiter(10);
    assert_eq!(run(&mut used, &plan), run(&mut fresh, &plan));
    assert_eq!(used.remainder(), fresh.remainder());
}

#[test]
fn identical_limiters_are_deterministic() {
    let plan: Vec<Uint> = (0..500).map(|i| (i * 7 + i / 3) % 13).collect();
    let mut a = new_limiter(12);
    let mut b = new_limiter(12);
    assert_eq!(run(&mut a, &plan), run(&mut b, &plan));
    assert_eq!(a.remainder(), b.remainder());
}

#[test]
fn config_conversion_matches_constructor() {
    let limiter: CarryLimiter = CarryLimiterConfig::new(20).emission_cap(4).try_into().unwrap();
    assert_eq!(limiter, CarryLimiter::with_cap(20, 4).unwrap());
}
