//! Weighted fusion of the strategy, ML and news buckets into one gated signal

use tracing::debug;

use crate::config::Config;
use crate::error::PredictionError;
use crate::models::signal::{Breakdown, BucketKind, FinalSignal, FusionOutcome, Signal, SourceSignal};
use crate::signals::scoring::{clamp_confidence, normalize_weights};
use crate::signals::sources::SignalSource;
use crate::signals::target::TargetCalculator;

pub struct FusionEngine;

impl FusionEngine {
    /// Weights of the available buckets rescaled to sum to 1.0
    ///
    /// Buckets with a zero configured weight drop out. Returns an empty vec
    /// when nothing remains.
    pub fn normalized_weights(available: &[BucketKind], config: &Config) -> Vec<(BucketKind, f64)> {
        let raw: Vec<f64> = available.iter().map(|k| config.weight_for(*k)).collect();
        if raw.iter().all(|w| *w <= 0.0) {
            return Vec::new();
        }
        available
            .iter()
            .copied()
            .zip(normalize_weights(&raw))
            .filter(|(_, w)| *w > 0.0)
            .collect()
    }

    /// Fuse bucket signals at `current_price`
    ///
    /// A later source of the same kind replaces an earlier one. `atr` of 0
    /// yields a target equal to the current price.
    pub fn fuse(
        sources: &[&dyn SignalSource],
        config: &Config,
        current_price: f64,
        atr: f64,
    ) -> Result<FusionOutcome, PredictionError> {
        let mut produced: Vec<(BucketKind, SourceSignal)> = Vec::with_capacity(BucketKind::ALL.len());
        for source in sources {
            let kind = source.kind();
            produced.retain(|(k, _)| *k != kind);
            match source.produce(config) {
                Ok(signal) => produced.push((kind, signal)),
                Err(err) => debug!(bucket = %kind, "{}", err),
            }
        }

        let available: Vec<BucketKind> = produced.iter().map(|(k, _)| *k).collect();
        let weights = Self::normalized_weights(&available, config);
        if weights.is_empty() {
            return Err(PredictionError::NoSignalSources);
        }

        let mut breakdown = Breakdown::default();
        let mut confidence = 0.0;
        // weighted BUY sum minus weighted SELL sum
        let mut net = 0.0;
        for (kind, weight) in &weights {
            let Some((_, signal)) = produced.iter().find(|(k, _)| k == kind) else {
                continue;
            };
            let contribution = signal.confidence * weight;
            confidence += contribution;
            net += signal.signal.direction() * contribution;
            *breakdown.get_mut(*kind) = signal.with_weight(*weight);
        }
        let confidence = clamp_confidence(confidence);

        let signal = if net > config.fusion_dead_band {
            Signal::Buy
        } else if -net > config.fusion_dead_band {
            Signal::Sell
        } else {
            Signal::Neutral
        };

        let meets_threshold = signal.is_directional() && confidence >= config.min_confidence_threshold;
        let high_confidence = meets_threshold && confidence >= config.high_confidence_threshold;

        let (target_price, target_type) = if meets_threshold {
            match TargetCalculator::calculate(signal, current_price, atr, confidence, config.atr_multiplier) {
                Some((price, kind)) => (Some(price), Some(kind)),
                None => (None, None),
            }
        } else {
            (None, None)
        };

        debug!(
            signal = %signal,
            confidence,
            net,
            meets_threshold,
            "Signals fused"
        );

        Ok(FusionOutcome {
            current_price,
            final_signal: FinalSignal {
                signal,
                confidence,
                target_price,
                target_type,
                meets_threshold,
                high_confidence,
            },
            breakdown,
        })
    }
}
