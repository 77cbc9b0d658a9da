//! Unit tests for the numeric helpers

use approx::assert_relative_eq;
use confluence::common::math::{
    ema_of_optional, ema_series, pct_change, sma, sma_series, standard_deviation, true_range,
    wilder_series,
};

#[test]
fn test_sma_uses_last_period_values() {
    assert_relative_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2).unwrap(), 3.5);
    assert!(sma(&[1.0], 2).is_none());
    assert!(sma(&[1.0, 2.0], 0).is_none());
}

#[test]
fn test_standard_deviation_is_population() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_relative_eq!(standard_deviation(&values, 8).unwrap(), 2.0);
}

#[test]
fn test_sma_series_alignment() {
    let out = sma_series(&[1.0, 2.0, 3.0, 4.0], 2);
    assert_eq!(out, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
}

#[test]
fn test_ema_series_is_sma_seeded() {
    let out = ema_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert!(out[..2].iter().all(Option::is_none));
    assert_relative_eq!(out[2].unwrap(), 2.0);
    assert_relative_eq!(out[3].unwrap(), 3.0);
    assert_relative_eq!(out[4].unwrap(), 4.0);
}

#[test]
fn test_ema_of_optional_skips_warm_up() {
    let out = ema_of_optional(&[None, None, Some(1.0), Some(2.0), Some(3.0)], 2);
    assert!(out[..3].iter().all(Option::is_none));
    assert_relative_eq!(out[3].unwrap(), 1.5);
    assert_relative_eq!(out[4].unwrap(), 2.5);
}

#[test]
fn test_wilder_series() {
    let out = wilder_series(&[1.0, 2.0, 3.0, 4.0], 2);
    assert!(out[0].is_none());
    assert_relative_eq!(out[1].unwrap(), 1.5);
    assert_relative_eq!(out[2].unwrap(), 2.25);
    assert_relative_eq!(out[3].unwrap(), 3.125);
}

#[test]
fn test_true_range_includes_gap() {
    assert_relative_eq!(true_range(10.0, 8.0, 12.0), 4.0);
    assert_relative_eq!(true_range(10.0, 8.0, 9.0), 2.0);
}

#[test]
fn test_pct_change() {
    assert_relative_eq!(pct_change(100.0, 101.0).unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(pct_change(100.0, 98.0).unwrap(), -2.0, epsilon = 1e-12);
    assert!(pct_change(0.0, 1.0).is_none());
}
