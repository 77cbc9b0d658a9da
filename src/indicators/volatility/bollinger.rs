//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::Candle;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
pub fn calculate_bollinger_bands(candles: &[Candle], period: usize, std_dev: f64) -> BollingerSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma_series(&closes, period);
    let deviation = math::std_dev_series(&closes, period);

    let (upper, lower) = middle
        .iter()
        .zip(deviation.iter())
        .map(|(m, d)| match (m, d) {
            (Some(m), Some(d)) => (Some(m + std_dev * d), Some(m - std_dev * d)),
            _ => (None, None),
        })
        .unzip();

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(candles: &[Candle]) -> BollingerSeries {
    calculate_bollinger_bands(candles, 20, 2.0)
}

/// Position of `price` inside the bands: 0 at the lower band, 1 at the upper.
/// Collapsed bands report the midpoint.
pub fn band_position(price: f64, lower: f64, upper: f64) -> f64 {
    if upper == lower {
        return 0.5;
    }
    (price - lower) / (upper - lower)
}
