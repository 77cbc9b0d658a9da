//! Strategy bucket: confidence-weighted vote over the enabled strategies

use tracing::debug;

use crate::config::Config;
use crate::models::signal::{Signal, SourceSignal};
use crate::models::strategy::StrategySignal;

/// Vote tally of one aggregation, kept for explainability
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VoteTally {
    pub buy_count: usize,
    pub sell_count: usize,
    pub neutral_count: usize,
    pub buy_confidence: f64,
    pub sell_confidence: f64,
    pub neutral_confidence: f64,
}

impl VoteTally {
    pub fn from_signals<'a, I>(signals: I) -> Self
    where
        I: IntoIterator<Item = &'a StrategySignal>,
    {
        let mut tally = Self::default();
        for s in signals.into_iter().filter(|s| s.available) {
            match s.signal {
                Signal::Buy => {
                    tally.buy_count += 1;
                    tally.buy_confidence += s.confidence;
                }
                Signal::Sell => {
                    tally.sell_count += 1;
                    tally.sell_confidence += s.confidence;
                }
                Signal::Neutral => {
                    tally.neutral_count += 1;
                    tally.neutral_confidence += s.confidence;
                }
            }
        }
        tally
    }
}

pub struct StrategyAggregator;

impl StrategyAggregator {
    /// Combine per-strategy votes into the strategy bucket
    ///
    /// Only strategies enabled in `config` take part. Returns `None` when no
    /// strategy is enabled or none of the enabled ones had indicator data.
    pub fn aggregate(signals: &[StrategySignal], config: &Config) -> Option<SourceSignal> {
        let enabled_count = config.enabled_strategies.len();
        if enabled_count == 0 {
            return None;
        }

        let enabled: Vec<&StrategySignal> = signals
            .iter()
            .filter(|s| config.is_strategy_enabled(s.strategy))
            .collect();
        if !enabled.iter().any(|s| s.available) {
            return None;
        }

        let tally = VoteTally::from_signals(enabled.iter().copied());
        let divisor = enabled_count as f64;

        let result = if tally.buy_confidence > tally.sell_confidence {
            SourceSignal::new(Signal::Buy, (tally.buy_confidence / divisor).min(100.0))
        } else if tally.sell_confidence > tally.buy_confidence {
            SourceSignal::new(Signal::Sell, (tally.sell_confidence / divisor).min(100.0))
        } else {
            let confidence = if tally.neutral_count > 0 {
                tally.neutral_confidence / tally.neutral_count as f64
            } else {
                0.0
            };
            SourceSignal::new(Signal::Neutral, confidence)
        };

        debug!(
            buy = tally.buy_count,
            sell = tally.sell_count,
            neutral = tally.neutral_count,
            signal = %result.signal,
            confidence = result.confidence,
            "Strategies aggregated"
        );
        Some(result)
    }
}
