//! Unit tests for the strategy aggregator

use approx::assert_relative_eq;
use confluence::config::Config;
use confluence::models::{Signal, StrategyKind, StrategySignal};
use confluence::signals::aggregation::{StrategyAggregator, VoteTally};

fn vote(kind: StrategyKind, signal: Signal, confidence: f64) -> StrategySignal {
    StrategySignal::new(kind, signal, confidence, String::new())
}

#[test]
fn test_confidence_weighted_majority() {
    let signals = vec![
        vote(StrategyKind::Rsi, Signal::Buy, 60.0),
        vote(StrategyKind::EmaCrossover, Signal::Buy, 60.0),
        vote(StrategyKind::Macd, Signal::Sell, 90.0),
        vote(StrategyKind::Bollinger, Signal::Neutral, 40.0),
        vote(StrategyKind::VolumeSpike, Signal::Neutral, 25.0),
        vote(StrategyKind::SupportResistance, Signal::Neutral, 30.0),
    ];
    let result = StrategyAggregator::aggregate(&signals, &Config::default()).unwrap();
    assert_eq!(result.signal, Signal::Buy);
    assert_relative_eq!(result.confidence, 120.0 / 6.0);
    assert!(result.available);
}

#[test]
fn test_unavailable_strategies_still_count_in_divisor() {
    let signals = vec![
        vote(StrategyKind::Rsi, Signal::Sell, 90.0),
        StrategySignal::insufficient_data(StrategyKind::Macd),
    ];
    let config = Config::default().with_enabled_strategies([StrategyKind::Rsi, StrategyKind::Macd]);
    let result = StrategyAggregator::aggregate(&signals, &config).unwrap();
    assert_eq!(result.signal, Signal::Sell);
    assert_relative_eq!(result.confidence, 45.0);
}

#[test]
fn test_tie_is_neutral_with_neutral_average() {
    let signals = vec![
        vote(StrategyKind::Rsi, Signal::Buy, 60.0),
        vote(StrategyKind::Macd, Signal::Sell, 60.0),
        vote(StrategyKind::Bollinger, Signal::Neutral, 40.0),
        vote(StrategyKind::VolumeSpike, Signal::Neutral, 20.0),
    ];
    let config = Config::default().with_enabled_strategies([
        StrategyKind::Rsi,
        StrategyKind::Macd,
        StrategyKind::Bollinger,
        StrategyKind::VolumeSpike,
    ]);
    let result = StrategyAggregator::aggregate(&signals, &config).unwrap();
    assert_eq!(result.signal, Signal::Neutral);
    assert_relative_eq!(result.confidence, 30.0);
}

#[test]
fn test_tie_without_neutral_voters_is_zero() {
    let signals = vec![
        vote(StrategyKind::Rsi, Signal::Buy, 50.0),
        vote(StrategyKind::Macd, Signal::Sell, 50.0),
    ];
    let config = Config::default().with_enabled_strategies([StrategyKind::Rsi, StrategyKind::Macd]);
    let result = StrategyAggregator::aggregate(&signals, &config).unwrap();
    assert_eq!(result.signal, Signal::Neutral);
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn test_disabled_strategies_ignored() {
    let signals = vec![
        vote(StrategyKind::Rsi, Signal::Buy, 80.0),
        vote(StrategyKind::Macd, Signal::Sell, 100.0),
    ];
    let config = Config::default().with_enabled_strategies([StrategyKind::Rsi]);
    let result = StrategyAggregator::aggregate(&signals, &config).unwrap();
    assert_eq!(result.signal, Signal::Buy);
    assert_relative_eq!(result.confidence, 80.0);
}

#[test]
fn test_no_enabled_strategies_unavailable() {
    let signals = vec![vote(StrategyKind::Rsi, Signal::Buy, 80.0)];
    let config = Config::default().with_enabled_strategies(Vec::<StrategyKind>::new());
    assert!(StrategyAggregator::aggregate(&signals, &config).is_none());
}

#[test]
fn test_all_insufficient_unavailable() {
    let signals: Vec<StrategySignal> = StrategyKind::ALL
        .iter()
        .map(|k| StrategySignal::insufficient_data(*k))
        .collect();
    assert!(StrategyAggregator::aggregate(&signals, &Config::default()).is_none());
}

#[test]
fn test_vote_tally_skips_unavailable() {
    let signals = vec![
        vote(StrategyKind::Rsi, Signal::Buy, 60.0),
        StrategySignal::insufficient_data(StrategyKind::Macd),
    ];
    let tally = VoteTally::from_signals(&signals);
    assert_eq!(tally.buy_count, 1);
    assert_eq!(tally.neutral_count, 0);
}
