//! News bucket: headline polarity blended with the fear & greed index

use serde::{Deserialize, Serialize};

use crate::config::NewsParams;
use crate::models::signal::{Signal, SourceSignal};
use crate::signals::scoring::{normalize_fear_greed, score_to_confidence};

/// Sentiment inputs for one coin; either may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    /// Average headline polarity, roughly -1 (bearish) to +1 (bullish)
    #[serde(default)]
    pub polarity: Option<f64>,
    /// Market-wide fear & greed index, 0 to 100
    #[serde(default)]
    pub fear_greed: Option<u8>,
}

impl SentimentSnapshot {
    pub fn new(polarity: Option<f64>, fear_greed: Option<u8>) -> Self {
        Self { polarity, fear_greed }
    }

    /// Mean of the available signed scores in [-1, 1]
    pub fn combined_score(&self) -> Option<f64> {
        let scores: Vec<f64> = [
            self.polarity.filter(|p| p.is_finite()).map(|p| p.clamp(-1.0, 1.0)),
            self.fear_greed.map(normalize_fear_greed),
        ]
        .into_iter()
        .flatten()
        .collect();

        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}

pub struct NewsSentimentAggregator;

impl NewsSentimentAggregator {
    pub fn aggregate(snapshot: &SentimentSnapshot, params: &NewsParams) -> Option<SourceSignal> {
        let score = snapshot.combined_score()?;
        let signal = if score > params.dead_band {
            Signal::Buy
        } else if score < -params.dead_band {
            Signal::Sell
        } else {
            Signal::Neutral
        };
        Some(SourceSignal::new(signal, score_to_confidence(score)))
    }
}
