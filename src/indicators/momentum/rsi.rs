//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Where an RSI reading sits relative to the configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Oversold,
    Overbought,
    Neutral,
}

/// Calculate RSI for every candle
///
/// RSI = 100 - (100 / (1 + RS)), RS = Average Gain / Average Loss,
/// both averages Wilder-smoothed. First value at index `period`.
/// A window of `period` unchanged closes leaves the value undefined, even when
/// the smoothed averages still carry an earlier trend.
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if period == 0 || candles.len() < period + 1 {
        return out;
    }

    let mut gains = Vec::with_capacity(candles.len() - 1);
    let mut losses = Vec::with_capacity(candles.len() - 1);
    for pair in candles.windows(2) {
        let change = pair[1].close - pair[0].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gains = math::wilder_series(&gains, period);
    let avg_losses = math::wilder_series(&losses, period);

    let mut flat_run = 0;
    for (i, (gain, loss)) in avg_gains.iter().zip(avg_losses.iter()).enumerate() {
        flat_run = if gains[i] == 0.0 && losses[i] == 0.0 { flat_run + 1 } else { 0 };
        if flat_run >= period {
            continue;
        }
        if let (Some(gain), Some(loss)) = (gain, loss) {
            out[i + 1] = rsi_from_averages(*gain, *loss);
        }
    }
    out
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Vec<Option<f64>> {
    calculate_rsi(candles, 14)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return None;
    }
    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

pub fn rsi_zone(value: f64, overbought: f64, oversold: f64) -> RsiZone {
    if value <= oversold {
        RsiZone::Oversold
    } else if value >= overbought {
        RsiZone::Overbought
    } else {
        RsiZone::Neutral
    }
}
