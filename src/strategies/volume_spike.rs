//! Volume spike strategy: unusual volume confirming the candle's direction

use crate::common::math;
use crate::config::StrategyParams;
use crate::indicators::volume::volume_ratio;
use crate::models::indicators::{names, IndicatorSeries};
use crate::models::signal::Signal;
use crate::models::strategy::{StrategyKind, StrategySignal};

/// Price change (percent) a spike needs to count as directional
const SPIKE_MOVE_PCT: f64 = 1.0;
const MINOR_RATIO: f64 = 1.2;
const MINOR_MOVE_PCT: f64 = 0.5;

pub fn evaluate(series: &IndicatorSeries, params: &StrategyParams) -> StrategySignal {
    let (Some(volume), Some(baseline), Some(close), Some(prev_close)) = (
        series.latest(names::VOLUME),
        series.latest(names::VOLUME_SMA),
        series.latest(names::CLOSE),
        series.previous(names::CLOSE),
    ) else {
        return StrategySignal::insufficient_data(StrategyKind::VolumeSpike);
    };
    let Some(change_pct) = math::pct_change(prev_close, close) else {
        return StrategySignal::insufficient_data(StrategyKind::VolumeSpike);
    };

    let ratio = volume_ratio(volume, baseline);
    let multiplier = params.volume_spike_multiplier;
    let is_spike = ratio >= multiplier;

    let (signal, confidence, reason) = if is_spike {
        let confidence = (50.0 + (ratio - multiplier) * 15.0 + change_pct.abs() * 3.0).min(100.0);
        if change_pct > SPIKE_MOVE_PCT {
            (Signal::Buy, confidence, format!("{:.2}x volume on {:+.2}% move", ratio, change_pct))
        } else if change_pct < -SPIKE_MOVE_PCT {
            (Signal::Sell, confidence, format!("{:.2}x volume on {:+.2}% move", ratio, change_pct))
        } else {
            (Signal::Neutral, 30.0, format!("{:.2}x volume without direction", ratio))
        }
    } else if ratio > MINOR_RATIO && change_pct.abs() > MINOR_MOVE_PCT {
        let signal = if change_pct > 0.0 { Signal::Buy } else { Signal::Sell };
        (
            signal,
            (30.0 + (ratio - 1.0) * 20.0).max(20.0),
            format!("Elevated volume ({:.2}x) on {:+.2}% move", ratio, change_pct),
        )
    } else {
        (
            Signal::Neutral,
            (25.0 - (1.0 - ratio).abs() * 10.0).max(10.0),
            "No volume spike".to_string(),
        )
    };

    StrategySignal::new(StrategyKind::VolumeSpike, signal, confidence, reason)
        .with_detail("volume", volume)
        .with_detail("volume_sma", baseline)
        .with_detail("volume_ratio", ratio)
        .with_detail("price_change_pct", change_pct)
}
