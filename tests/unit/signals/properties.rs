//! Property tests for the fusion engine

use confluence::config::Config;
use confluence::error::PredictionError;
use confluence::models::{BucketKind, Signal, SourceSignal};
use confluence::signals::fusion::FusionEngine;
use confluence::signals::sources::{FixedSource, SignalSource};
use proptest::prelude::*;

fn signal_strategy() -> impl Strategy<Value = Signal> {
    prop_oneof![Just(Signal::Buy), Just(Signal::Sell), Just(Signal::Neutral)]
}

fn bucket_strategy() -> impl Strategy<Value = Option<SourceSignal>> {
    proptest::option::of((signal_strategy(), 0.0f64..=100.0).prop_map(|(s, c)| SourceSignal::new(s, c)))
}

fn weights_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0)
}

fn run(
    buckets: [Option<SourceSignal>; 3],
    config: &Config,
    atr: f64,
) -> Result<confluence::models::FusionOutcome, PredictionError> {
    let [strategy, ml, news] = buckets;
    let strategy = FixedSource::new(BucketKind::Strategy, strategy);
    let ml = FixedSource::new(BucketKind::Ml, ml);
    let news = FixedSource::new(BucketKind::News, news);
    let sources: [&dyn SignalSource; 3] = [&strategy, &ml, &news];
    FusionEngine::fuse(&sources, config, 100.0, atr)
}

proptest! {
    #[test]
    fn prop_available_weights_sum_to_one(
        strategy in bucket_strategy(),
        ml in bucket_strategy(),
        news in bucket_strategy(),
        (ws, wm, wn) in weights_strategy(),
    ) {
        let config = Config::default().with_weights(ws, wm, wn);
        match run([strategy, ml, news], &config, 1.0) {
            Ok(outcome) => {
                let total: f64 = BucketKind::ALL
                    .iter()
                    .map(|k| outcome.breakdown.get(*k))
                    .filter(|b| b.available)
                    .map(|b| b.weight)
                    .sum();
                prop_assert!((total - 1.0).abs() < 1e-9);
                for kind in BucketKind::ALL {
                    let bucket = outcome.breakdown.get(kind);
                    if !bucket.available {
                        prop_assert_eq!(bucket.weight, 0.0);
                    }
                }
            }
            Err(err) => prop_assert_eq!(err, PredictionError::NoSignalSources),
        }
    }

    #[test]
    fn prop_confidence_and_gates_consistent(
        strategy in bucket_strategy(),
        ml in bucket_strategy(),
        news in bucket_strategy(),
        atr in 0.01f64..1000.0,
        min_confidence in 0.0f64..=100.0,
    ) {
        let config = Config::default().with_min_confidence(min_confidence);
        let Ok(outcome) = run([strategy, ml, news], &config, atr) else {
            prop_assert!(strategy.is_none() && ml.is_none() && news.is_none());
            return Ok(());
        };
        let final_signal = outcome.final_signal;

        prop_assert!((0.0..=100.0).contains(&final_signal.confidence));
        prop_assert_eq!(
            final_signal.meets_threshold,
            final_signal.signal.is_directional() && final_signal.confidence >= min_confidence
        );
        prop_assert!(!final_signal.high_confidence || final_signal.meets_threshold);
        prop_assert_eq!(final_signal.target_price.is_some(), final_signal.meets_threshold);
        prop_assert_eq!(final_signal.target_type.is_some(), final_signal.meets_threshold);

        if let Some(target) = final_signal.target_price {
            match final_signal.signal {
                Signal::Buy => prop_assert!(target > 100.0),
                Signal::Sell => prop_assert!(target < 100.0),
                Signal::Neutral => prop_assert!(false, "neutral signal carried a target"),
            }
        }
    }

    #[test]
    fn prop_fusion_is_deterministic(
        strategy in bucket_strategy(),
        ml in bucket_strategy(),
        news in bucket_strategy(),
        atr in 0.0f64..100.0,
    ) {
        let config = Config::default();
        let first = run([strategy, ml, news], &config, atr);
        let second = run([strategy, ml, news], &config, atr);
        prop_assert_eq!(first, second);
    }
}
