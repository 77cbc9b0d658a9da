//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Calculate ATR (Average True Range)
///
/// True range starts at the second candle (it needs a previous close). The
/// first ATR is the SMA of `period` true ranges, then Wilder's smoothing.
/// First value at index `period`.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if candles.len() < 2 {
        return out;
    }

    let tr_values: Vec<f64> = candles
        .windows(2)
        .map(|pair| math::true_range(pair[1].high, pair[1].low, pair[0].close))
        .collect();

    for (i, value) in math::wilder_series(&tr_values, period).into_iter().enumerate() {
        out[i + 1] = value;
    }
    out
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Vec<Option<f64>> {
    calculate_atr(candles, 14)
}
