//! Rolling volume baseline

use crate::common::math;
use crate::models::indicators::Candle;

/// SMA of volume over `period` candles, including the current one
pub fn calculate_volume_sma(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    math::sma_series(&volumes, period)
}

/// Current volume relative to its baseline; a zero baseline reads as 1.0
pub fn volume_ratio(volume: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        volume / baseline
    } else {
        1.0
    }
}
