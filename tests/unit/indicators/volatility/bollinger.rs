//! Unit tests for Bollinger Bands

use approx::assert_relative_eq;
use chrono::Utc;
use confluence::indicators::volatility::{band_position, calculate_bollinger_bands, calculate_bollinger_bands_default};
use confluence::models::indicators::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .map(|&c| Candle::new(c, c, c, c, 1000.0, Utc::now()))
        .collect()
}

#[test]
fn test_bollinger_known_values() {
    let candles = candles_from_closes(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    let bands = calculate_bollinger_bands(&candles, 8, 2.0);
    assert!(bands.middle[6].is_none());
    assert_relative_eq!(bands.middle[7].unwrap(), 5.0);
    assert_relative_eq!(bands.upper[7].unwrap(), 9.0);
    assert_relative_eq!(bands.lower[7].unwrap(), 1.0);
}

#[test]
fn test_bollinger_flat_prices_collapse() {
    let candles = candles_from_closes(&[50.0; 25]);
    let bands = calculate_bollinger_bands_default(&candles);
    assert_relative_eq!(bands.upper[24].unwrap(), 50.0);
    assert_relative_eq!(bands.lower[24].unwrap(), 50.0);
}

#[test]
fn test_band_position() {
    assert_relative_eq!(band_position(5.0, 1.0, 9.0), 0.5);
    assert_relative_eq!(band_position(1.0, 1.0, 9.0), 0.0);
    assert_relative_eq!(band_position(9.0, 1.0, 9.0), 1.0);
    assert_relative_eq!(band_position(50.0, 50.0, 50.0), 0.5);
}
