//! Unit tests for the prediction engine

use chrono::{DateTime, Duration, TimeZone, Utc};
use confluence::config::Config;
use confluence::error::PredictionError;
use confluence::models::indicators::Candle;
use confluence::models::{BucketKind, Timeframe};
use confluence::signals::engine::{EvaluationInput, PredictionEngine};
use confluence::signals::ml::{EnsembleOutput, ModelPrediction};
use confluence::signals::news::SentimentSnapshot;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn hourly_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let price = 100.0 + (i as f64 * 0.4).sin() * 3.0 + i as f64 * 0.05;
            Candle::new(
                price - 0.2,
                price + 1.0,
                price - 1.0,
                price,
                1000.0 + (i % 7) as f64 * 50.0,
                start() + Duration::hours(i as i64),
            )
        })
        .collect()
}

fn input(candles: Vec<Candle>, as_of: DateTime<Utc>) -> EvaluationInput {
    EvaluationInput {
        coin: "BTC".to_string(),
        timeframe: Timeframe::H1,
        as_of,
        candles,
        ml: Some(EnsembleOutput::new(vec![ModelPrediction::ternary("xgb", 0.6, 0.3, 0.1)])),
        sentiment: SentimentSnapshot::new(Some(0.4), Some(70)),
    }
}

#[test]
fn test_closed_candles_drop_forming_bar() {
    let candles = hourly_candles(5);
    let as_of = start() + Duration::hours(4) + Duration::minutes(30);
    let closed = PredictionEngine::closed_candles(&candles, Timeframe::H1, as_of);
    assert_eq!(closed.len(), 4);

    // a bar closing exactly at as_of counts as closed
    let closed = PredictionEngine::closed_candles(&candles, Timeframe::H1, start() + Duration::hours(5));
    assert_eq!(closed.len(), 5);
}

#[test]
fn test_closed_candles_sorted() {
    let mut candles = hourly_candles(5);
    candles.reverse();
    let closed = PredictionEngine::closed_candles(&candles, Timeframe::H1, start() + Duration::hours(10));
    assert!(closed.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn test_evaluate_uses_live_price_and_closed_stamp() {
    let candles = hourly_candles(60);
    let live_close = candles[59].close;
    let as_of = start() + Duration::hours(59) + Duration::minutes(10);
    let prediction = PredictionEngine::evaluate(&input(candles, as_of), &Config::default()).unwrap();

    assert_eq!(prediction.coin, "BTC");
    assert_eq!(prediction.current_price, live_close);
    assert_eq!(prediction.candle_timestamp, start() + Duration::hours(58));
    assert!(prediction.atr.is_some());
    assert_eq!(prediction.strategies.len(), 6);
    assert!(prediction.breakdown.strategy.available);
    assert!(prediction.breakdown.ml.available);
    assert!(prediction.breakdown.news.available);
}

#[test]
fn test_forming_candle_does_not_move_strategies() {
    let candles = hourly_candles(60);
    let as_of = start() + Duration::hours(59) + Duration::minutes(10);

    let mut spiked = candles.clone();
    spiked[59] = Candle::new(100.0, 500.0, 1.0, 450.0, 1_000_000.0, spiked[59].timestamp);

    let closed_only = PredictionEngine::evaluate(&input(candles[..59].to_vec(), as_of), &Config::default()).unwrap();
    let with_forming = PredictionEngine::evaluate(&input(spiked, as_of), &Config::default()).unwrap();

    assert_eq!(closed_only.strategies, with_forming.strategies);
    assert_eq!(closed_only.atr, with_forming.atr);
    assert_eq!(with_forming.current_price, 450.0);
}

#[test]
fn test_evaluate_is_idempotent() {
    let as_of = start() + Duration::hours(80);
    let input = input(hourly_candles(70), as_of);
    let first = PredictionEngine::evaluate(&input, &Config::default()).unwrap();
    let second = PredictionEngine::evaluate(&input, &Config::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_no_candles_is_insufficient_data() {
    let result = PredictionEngine::evaluate(&input(Vec::new(), start()), &Config::default());
    assert!(matches!(result, Err(PredictionError::InsufficientData { available: 0, .. })));
}

#[test]
fn test_short_history_degrades_strategy_bucket() {
    // one closed candle: no indicator has warmed up
    let candles = hourly_candles(2);
    let as_of = start() + Duration::hours(1) + Duration::minutes(5);
    let prediction = PredictionEngine::evaluate(&input(candles, as_of), &Config::default()).unwrap();

    assert!(!prediction.breakdown.strategy.available);
    assert!(prediction.atr.is_none());
    assert!(prediction.breakdown.ml.available);
    assert_eq!(prediction.candle_timestamp, start());
}

#[test]
fn test_only_forming_candle_still_fuses_other_buckets() {
    let candles = hourly_candles(1);
    let prediction = PredictionEngine::evaluate(&input(candles, start() + Duration::minutes(5)), &Config::default()).unwrap();
    assert!(!prediction.breakdown.get(BucketKind::Strategy).available);
    assert_eq!(prediction.candle_timestamp, start());
}

#[test]
fn test_prediction_serializes_final_key() {
    let as_of = start() + Duration::hours(80);
    let prediction = PredictionEngine::evaluate(&input(hourly_candles(70), as_of), &Config::default()).unwrap();
    let json = serde_json::to_value(&prediction).unwrap();
    assert!(json.get("final").is_some());
    assert_eq!(json["timeframe"], "1h");
    assert!(json["breakdown"]["ml"]["available"].as_bool().unwrap());
}

#[test]
fn test_closed_candles_tolerate_far_future_stamp() {
    let mut candles = hourly_candles(2);
    candles.push(Candle::new(
        100.0,
        101.0,
        99.0,
        100.0,
        1000.0,
        DateTime::<Utc>::MAX_UTC - Duration::minutes(30),
    ));
    let closed = PredictionEngine::closed_candles(&candles, Timeframe::H1, start() + Duration::hours(3));
    assert_eq!(closed.len(), 2);
}
