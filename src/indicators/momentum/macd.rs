//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Aligned MACD, signal and histogram series
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// MACD line position relative to its signal line between two bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverType {
    Bullish,
    Bearish,
    None,
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast = math::ema_series(&closes, fast_period);
    let slow = math::ema_series(&closes, slow_period);

    let macd: Vec<Option<f64>> = fast
        .iter()
        .zip(slow.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal = math::ema_of_optional(&macd, signal_period);

    let histogram = macd
        .iter()
        .zip(signal.iter())
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> MacdSeries {
    calculate_macd(candles, 12, 26, 9)
}

/// Detect a MACD/signal cross between the previous and current bar
pub fn detect_crossover(prev_macd: f64, prev_signal: f64, macd: f64, signal: f64) -> CrossoverType {
    if prev_macd <= prev_signal && macd > signal {
        CrossoverType::Bullish
    } else if prev_macd >= prev_signal && macd < signal {
        CrossoverType::Bearish
    } else {
        CrossoverType::None
    }
}
