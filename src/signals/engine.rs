//! Pure prediction pipeline: candles + ML + sentiment -> fused prediction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::PredictionError;
use crate::indicators::registry::IndicatorRegistry;
use crate::models::indicators::{names, Candle};
use crate::models::signal::FusedPrediction;
use crate::models::timeframe::Timeframe;
use crate::signals::fusion::FusionEngine;
use crate::signals::ml::EnsembleOutput;
use crate::signals::news::SentimentSnapshot;
use crate::signals::sources::{MlSource, NewsSource, SignalSource, StrategySource};
use crate::strategies::evaluator::StrategyEvaluator;

/// Everything one evaluation reads. `as_of` stands in for "now".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub coin: String,
    pub timeframe: Timeframe,
    pub as_of: DateTime<Utc>,
    pub candles: Vec<Candle>,
    #[serde(default)]
    pub ml: Option<EnsembleOutput>,
    #[serde(default)]
    pub sentiment: SentimentSnapshot,
}

pub struct PredictionEngine;

impl PredictionEngine {
    /// Candles whose period ended at or before `as_of`, oldest first
    pub fn closed_candles(candles: &[Candle], timeframe: Timeframe, as_of: DateTime<Utc>) -> Vec<Candle> {
        let period = timeframe.duration();
        let mut closed: Vec<Candle> = candles
            .iter()
            .filter(|c| c.timestamp.checked_add_signed(period).is_some_and(|end| end <= as_of))
            .copied()
            .collect();
        closed.sort_by_key(|c| c.timestamp);
        closed
    }

    pub fn evaluate(input: &EvaluationInput, config: &Config) -> Result<FusedPrediction, PredictionError> {
        let newest = input
            .candles
            .iter()
            .max_by_key(|c| c.timestamp)
            .ok_or(PredictionError::InsufficientData {
                required: 1,
                available: 0,
            })?;
        let current_price = newest.close;

        // with nothing closed yet the strategy bucket degrades and the stamp
        // falls back to the forming candle
        let closed = Self::closed_candles(&input.candles, input.timeframe, input.as_of);
        let candle_timestamp = closed.last().map_or(newest.timestamp, |c| c.timestamp);

        let required = IndicatorRegistry::required_candles(&config.indicators);
        if closed.len() < required {
            debug!(
                coin = %input.coin,
                closed = closed.len(),
                required,
                "Short candle history, some strategies will report insufficient data"
            );
        }

        let series = IndicatorRegistry::compute(&closed, &config.indicators);
        let strategies = StrategyEvaluator::evaluate_enabled(&series, config);
        let atr = series.latest(names::ATR);

        let strategy_source = StrategySource::new(&strategies);
        let ml_source = MlSource::new(input.ml.as_ref());
        let news_source = NewsSource::new(&input.sentiment);
        let sources: [&dyn SignalSource; 3] = [&strategy_source, &ml_source, &news_source];

        let outcome = FusionEngine::fuse(&sources, config, current_price, atr.unwrap_or(0.0))?;

        info!(
            coin = %input.coin,
            timeframe = %input.timeframe,
            signal = %outcome.final_signal.signal,
            confidence = outcome.final_signal.confidence,
            meets_threshold = outcome.final_signal.meets_threshold,
            "Prediction evaluated"
        );

        Ok(FusedPrediction {
            coin: input.coin.clone(),
            timeframe: input.timeframe,
            candle_timestamp,
            current_price,
            atr,
            final_signal: outcome.final_signal,
            breakdown: outcome.breakdown,
            strategies,
        })
    }
}
