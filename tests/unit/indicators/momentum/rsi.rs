//! Unit tests for RSI indicator

use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use confluence::indicators::momentum::{calculate_rsi, calculate_rsi_default, rsi_zone, RsiZone};
use confluence::models::indicators::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(c, c + 0.5, c - 0.5, c, 1000.0, start + Duration::hours(i as i64)))
        .collect()
}

#[test]
fn test_rsi_aligned_with_candles() {
    let candles = candles_from_closes(&[100.0; 30]);
    assert_eq!(calculate_rsi_default(&candles).len(), 30);
}

#[test]
fn test_rsi_insufficient_data() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    assert!(calculate_rsi(&candles, 14).iter().all(Option::is_none));
}

#[test]
fn test_rsi_flat_prices_undefined() {
    let candles = candles_from_closes(&[100.0; 20]);
    assert!(calculate_rsi(&candles, 14).iter().all(Option::is_none));
}

#[test]
fn test_rsi_only_gains_is_100() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let rsi = calculate_rsi(&candles_from_closes(&closes), 14);
    assert!(rsi[13].is_none());
    assert_relative_eq!(rsi[14].unwrap(), 100.0);
    assert_relative_eq!(rsi[19].unwrap(), 100.0);
}

#[test]
fn test_rsi_only_losses_is_0() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
    let rsi = calculate_rsi(&candles_from_closes(&closes), 14);
    assert_relative_eq!(rsi[19].unwrap(), 0.0);
}

#[test]
fn test_rsi_wilder_values() {
    let rsi = calculate_rsi(&candles_from_closes(&[1.0, 2.0, 1.0, 2.0]), 2);
    assert!(rsi[0].is_none());
    assert!(rsi[1].is_none());
    assert_relative_eq!(rsi[2].unwrap(), 50.0);
    assert_relative_eq!(rsi[3].unwrap(), 75.0);
}

#[test]
fn test_rsi_zones_are_inclusive() {
    assert_eq!(rsi_zone(25.0, 70.0, 30.0), RsiZone::Oversold);
    assert_eq!(rsi_zone(30.0, 70.0, 30.0), RsiZone::Oversold);
    assert_eq!(rsi_zone(70.0, 70.0, 30.0), RsiZone::Overbought);
    assert_eq!(rsi_zone(50.0, 70.0, 30.0), RsiZone::Neutral);
}

#[test]
fn test_rsi_flat_after_trend_undefined() {
    let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    closes.extend([139.0; 20]);
    let rsi = calculate_rsi(&candles_from_closes(&closes), 14);

    // 13 unchanged closes still carry the rally
    assert_relative_eq!(rsi[52].unwrap(), 100.0);
    assert!(rsi[53].is_none());
    assert!(rsi[59].is_none());
}

#[test]
fn test_rsi_recovers_after_flat_window() {
    let mut closes = vec![100.0; 20];
    closes.push(101.0);
    let rsi = calculate_rsi(&candles_from_closes(&closes), 14);
    assert!(rsi[19].is_none());
    assert_relative_eq!(rsi[20].unwrap(), 100.0);
}
