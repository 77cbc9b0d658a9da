//! Support/Resistance strategy: breakouts and tests of pivot levels

use crate::config::StrategyParams;
use crate::models::indicators::{names, IndicatorSeries};
use crate::models::signal::Signal;
use crate::models::strategy::{StrategyKind, StrategySignal};

/// Neutral confidence when no level is in play
const NO_LEVEL_CONFIDENCE: f64 = 30.0;

/// `lookback` is the level-detection window; fewer candles means the
/// levels are not yet available.
pub fn evaluate(series: &IndicatorSeries, params: &StrategyParams, lookback: usize) -> StrategySignal {
    let Some(close) = series.latest(names::CLOSE) else {
        return StrategySignal::insufficient_data(StrategyKind::SupportResistance);
    };
    if series.len() < lookback || close <= 0.0 {
        return StrategySignal::insufficient_data(StrategyKind::SupportResistance);
    }

    let support = series.latest(names::SUPPORT);
    let resistance = series.latest(names::RESISTANCE);
    let broken_resistance = series.latest(names::BROKEN_RESISTANCE);
    let broken_support = series.latest(names::BROKEN_SUPPORT);

    let support_distance = support.map(|s| (close - s) / close * 100.0);
    let resistance_distance = resistance.map(|r| (r - close) / close * 100.0);
    let proximity = params.sr_proximity_pct;

    let (signal, confidence, reason) = if let Some(level) = broken_resistance.filter(|l| *l > 0.0) {
        let strength = (close - level) / level * 100.0;
        (
            Signal::Buy,
            (50.0 + strength * 20.0).min(100.0),
            format!("Broke resistance {:.2}", level),
        )
    } else if let Some(level) = broken_support.filter(|l| *l > 0.0) {
        let strength = (level - close) / level * 100.0;
        (
            Signal::Sell,
            (50.0 + strength * 20.0).min(100.0),
            format!("Broke support {:.2}", level),
        )
    } else if let Some(distance) = support_distance.filter(|d| *d < proximity) {
        (
            Signal::Buy,
            (60.0 + (proximity - distance) / proximity * 30.0).min(100.0),
            format!("Testing support ({:.2}% away)", distance),
        )
    } else if let Some(distance) = resistance_distance.filter(|d| *d < proximity) {
        (
            Signal::Sell,
            (60.0 + (proximity - distance) / proximity * 30.0).min(100.0),
            format!("Testing resistance ({:.2}% away)", distance),
        )
    } else {
        (Signal::Neutral, NO_LEVEL_CONFIDENCE, "No level in play".to_string())
    };

    let mut out = StrategySignal::new(StrategyKind::SupportResistance, signal, confidence, reason);
    for (name, value) in [
        ("nearest_support", support),
        ("nearest_resistance", resistance),
        ("support_distance_pct", support_distance),
        ("resistance_distance_pct", resistance_distance),
        ("broken_resistance", broken_resistance),
        ("broken_support", broken_support),
    ] {
        if let Some(value) = value {
            out = out.with_detail(name, value);
        }
    }
    out
}
