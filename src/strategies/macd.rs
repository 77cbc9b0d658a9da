//! MACD strategy: signal-line crosses scaled by histogram strength

use crate::config::StrategyParams;
use crate::indicators::momentum::{detect_crossover, CrossoverType};
use crate::models::indicators::{names, IndicatorSeries};
use crate::models::signal::Signal;
use crate::models::strategy::{StrategyKind, StrategySignal};

pub fn evaluate(series: &IndicatorSeries, params: &StrategyParams) -> StrategySignal {
    let (Some(macd), Some(signal_line), Some(histogram), Some(prev_macd), Some(prev_signal)) = (
        series.latest(names::MACD),
        series.latest(names::MACD_SIGNAL),
        series.latest(names::MACD_HISTOGRAM),
        series.previous(names::MACD),
        series.previous(names::MACD_SIGNAL),
    ) else {
        return StrategySignal::insufficient_data(StrategyKind::Macd);
    };

    let strength = histogram_strength(series, histogram, params.macd_histogram_window);
    let cross = detect_crossover(prev_macd, prev_signal, macd, signal_line);

    let (signal, confidence, reason) =
        if cross == CrossoverType::Bullish || (macd > signal_line && histogram > 0.0) {
            let reason = if cross == CrossoverType::Bullish {
                "MACD crossed above signal".to_string()
            } else {
                "MACD above signal".to_string()
            };
            (Signal::Buy, (50.0 + strength * 50.0).min(100.0), reason)
        } else if cross == CrossoverType::Bearish || (macd < signal_line && histogram < 0.0) {
            let reason = if cross == CrossoverType::Bearish {
                "MACD crossed below signal".to_string()
            } else {
                "MACD below signal".to_string()
            };
            (Signal::Sell, (50.0 + strength * 50.0).min(100.0), reason)
        } else {
            (
                Signal::Neutral,
                (40.0 - strength * 20.0).max(20.0),
                "MACD flat against signal".to_string(),
            )
        };

    StrategySignal::new(StrategyKind::Macd, signal, confidence, reason)
        .with_detail("macd", macd)
        .with_detail("signal_line", signal_line)
        .with_detail("histogram", histogram)
        .with_detail("histogram_strength", strength)
}

/// |histogram| relative to the largest |histogram| over the recent window, in [0, 1]
pub fn histogram_strength(series: &IndicatorSeries, histogram: f64, window: usize) -> f64 {
    let range = series
        .recent_values(names::MACD_HISTOGRAM, window)
        .into_iter()
        .map(f64::abs)
        .fold(0.0_f64, f64::max);
    if range > 0.0 {
        (histogram.abs() / range).min(1.0)
    } else {
        0.0
    }
}
