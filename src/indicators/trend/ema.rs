//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Fast/slow EMA relationship between two consecutive bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmaCross {
    /// Fast crossed above slow
    Golden,
    /// Fast crossed below slow
    Death,
    None,
}

/// Calculate EMA of closes for every candle
pub fn calculate_ema(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema_series(&closes, period)
}

/// Calculate multiple EMAs at once
pub fn calculate_emas(candles: &[Candle], periods: &[usize]) -> Vec<Vec<Option<f64>>> {
    periods
        .iter()
        .map(|&period| calculate_ema(candles, period))
        .collect()
}

/// Check for an EMA cross between the previous and current bar
pub fn check_ema_cross(prev_fast: f64, prev_slow: f64, fast: f64, slow: f64) -> EmaCross {
    if prev_fast <= prev_slow && fast > slow {
        EmaCross::Golden
    } else if prev_fast >= prev_slow && fast < slow {
        EmaCross::Death
    } else {
        EmaCross::None
    }
}
