//! Strategy dispatch over a precomputed indicator series

use tracing::debug;

use crate::config::Config;
use crate::models::indicators::IndicatorSeries;
use crate::models::strategy::{StrategyKind, StrategySignal};
use crate::strategies::{bollinger, ema_crossover, macd, rsi, support_resistance, volume_spike};

pub struct StrategyEvaluator;

impl StrategyEvaluator {
    /// Evaluate one strategy at the newest bar of `series`
    pub fn evaluate(kind: StrategyKind, series: &IndicatorSeries, config: &Config) -> StrategySignal {
        let params = &config.strategies;
        match kind {
            StrategyKind::Rsi => rsi::evaluate(series, params),
            StrategyKind::EmaCrossover => ema_crossover::evaluate(series, params),
            StrategyKind::Macd => macd::evaluate(series, params),
            StrategyKind::Bollinger => bollinger::evaluate(series, params),
            StrategyKind::VolumeSpike => volume_spike::evaluate(series, params),
            StrategyKind::SupportResistance => {
                support_resistance::evaluate(series, params, config.indicators.sr_lookback)
            }
        }
    }

    /// Evaluate every enabled strategy, in `StrategyKind` order
    pub fn evaluate_enabled(series: &IndicatorSeries, config: &Config) -> Vec<StrategySignal> {
        config
            .enabled_strategies
            .iter()
            .map(|kind| {
                let result = Self::evaluate(*kind, series, config);
                debug!(
                    strategy = %kind,
                    signal = %result.signal,
                    confidence = result.confidence,
                    available = result.available,
                    "Strategy evaluated"
                );
                result
            })
            .collect()
    }
}
