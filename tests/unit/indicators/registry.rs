//! Unit tests for the indicator registry

use chrono::{Duration, TimeZone, Utc};
use confluence::config::IndicatorParams;
use confluence::indicators::registry::{IndicatorCategory, IndicatorRegistry};
use confluence::models::indicators::{names, Candle};

fn trending_candles(count: usize) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let price = 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1;
            Candle::new(price, price + 1.0, price - 1.0, price, 1000.0 + i as f64, start + Duration::hours(i as i64))
        })
        .collect()
}

#[test]
fn test_compute_produces_every_series() {
    let params = IndicatorParams::default();
    let series = IndicatorRegistry::compute(&trending_candles(80), &params);
    assert_eq!(series.len(), 80);
    for name in IndicatorRegistry::all_names() {
        let values = series.get(name).unwrap();
        assert_eq!(values.len(), 80, "{} misaligned", name);
    }
}

#[test]
fn test_warm_up_matches_first_value() {
    let params = IndicatorParams::default();
    let series = IndicatorRegistry::compute(&trending_candles(80), &params);
    for name in [names::RSI, names::EMA_SLOW, names::MACD, names::MACD_SIGNAL, names::BB_MIDDLE, names::ATR, names::VOLUME_SMA] {
        let warm_up = IndicatorRegistry::warm_up(name, &params).unwrap();
        assert!(series.value_at(name, warm_up - 2).is_none(), "{} too early", name);
        assert!(series.value_at(name, warm_up - 1).is_some(), "{} missing", name);
    }
}

#[test]
fn test_required_candles_default() {
    // S/R lookback dominates the defaults
    assert_eq!(IndicatorRegistry::required_candles(&IndicatorParams::default()), 50);
}

#[test]
fn test_empty_input() {
    let series = IndicatorRegistry::compute(&[], &IndicatorParams::default());
    assert!(series.is_empty());
    assert!(series.latest(names::CLOSE).is_none());
}

#[test]
fn test_categories() {
    assert_eq!(IndicatorRegistry::category(names::RSI), Some(IndicatorCategory::Momentum));
    assert_eq!(IndicatorRegistry::category(names::ATR), Some(IndicatorCategory::Volatility));
    assert_eq!(IndicatorRegistry::category(names::SUPPORT), Some(IndicatorCategory::Structure));
    assert_eq!(IndicatorRegistry::category("unknown"), None);
}
