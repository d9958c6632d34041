//! Tests for weighted sampling

use race_sim_core::rng::sampling::{normalize, weighted_index, weighted_sample, Replacement, WEIGHT_FLOOR};
use race_sim_core::RngManager;

#[test]
fn test_normalize_sums_to_one() {
    let p = normalize(&[6.0, 3.0, 1.0]);
    assert!((p[0] - 0.6).abs() < 1e-12);
    assert!((p[1] - 0.3).abs() < 1e-12);
    assert!((p[2] - 0.1).abs() < 1e-12);
}

#[test]
fn test_normalize_floors_non_positive_weights() {
    let p = normalize(&[1.0, 0.0, -3.0]);
    assert!(p.iter().all(|&x| x > 0.0));
    assert!((p[1] - WEIGHT_FLOOR / (1.0 + 2.0 * WEIGHT_FLOOR)).abs() < 1e-15);
}

#[test]
fn test_all_zero_weights_are_uniform() {
    let p = normalize(&[0.0, 0.0, 0.0, 0.0]);
    for x in p {
        assert!((x - 0.25).abs() < 1e-12);
    }
}

#[test]
#[should_panic(expected = "cannot normalize an empty weight vector")]
fn test_normalize_empty_panics() {
    normalize(&[]);
}

#[test]
#[should_panic]
fn test_normalize_infinite_total_panics() {
    normalize(&[f64::INFINITY, 1.0]);
}

#[test]
fn test_weighted_index_matches_weights() {
    let mut rng = RngManager::new(20260222);
    let mut counts = [0u32; 3];

    for _ in 0..100_000 {
        counts[weighted_index(&[6.0, 3.0, 1.0], &mut rng)] += 1;
    }

    // ~5 standard deviations for the largest bucket
    assert!((counts[0] as i64 - 60_000).abs() < 1_000, "{:?}", counts);
    assert!((counts[1] as i64 - 30_000).abs() < 1_000, "{:?}", counts);
    assert!((counts[2] as i64 - 10_000).abs() < 1_000, "{:?}", counts);
}

#[test]
fn test_without_replacement_is_distinct() {
    let mut rng = RngManager::new(8);
    let weights = [5.0, 1.0, 1.0, 0.1, 9.0, 2.0, 3.0, 0.5];

    for _ in 0..500 {
        let mut drawn = weighted_sample(&weights, 6, Replacement::Without, &mut rng);
        assert_eq!(drawn.len(), 6);
        drawn.sort_unstable();
        drawn.dedup();
        assert_eq!(drawn.len(), 6);
    }
}

#[test]
fn test_without_replacement_capped_at_population() {
    let mut rng = RngManager::new(8);
    let drawn = weighted_sample(&[1.0, 1.0, 1.0], 12, Replacement::Without, &mut rng);
    assert_eq!(drawn.len(), 3);
}

#[test]
fn test_with_replacement_can_repeat() {
    let mut rng = RngManager::new(8);
    let drawn = weighted_sample(&[1.0, 1e-9], 20, Replacement::With, &mut rng);

    assert_eq!(drawn.len(), 20);
    assert!(drawn.iter().filter(|&&i| i == 0).count() > 1);
}

#[test]
fn test_empty_sample_consumes_nothing() {
    let mut rng = RngManager::new(8);
    let before = rng.get_state();

    let drawn = weighted_sample(&[1.0, 2.0], 0, Replacement::Without, &mut rng);

    assert!(drawn.is_empty());
    assert_eq!(rng.get_state(), before);
}
