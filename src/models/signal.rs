use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::strategy::StrategySignal;
use crate::models::timeframe::Timeframe;

/// Trading direction emitted by every stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Neutral,
}

impl Signal {
    /// +1 for BUY, -1 for SELL, 0 for NEUTRAL
    pub fn direction(&self) -> f64 {
        match self {
            Signal::Buy => 1.0,
            Signal::Sell => -1.0,
            Signal::Neutral => 0.0,
        }
    }

    pub fn is_directional(&self) -> bool {
        !matches!(self, Signal::Neutral)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}

/// The three signal sources consumed by the fusion engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    Strategy,
    Ml,
    News,
}

impl BucketKind {
    pub const ALL: [BucketKind; 3] = [BucketKind::Strategy, BucketKind::Ml, BucketKind::News];
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BucketKind::Strategy => "strategy",
            BucketKind::Ml => "ml",
            BucketKind::News => "news",
        };
        f.write_str(s)
    }
}

/// Signal + confidence of one bucket. `weight` is the normalized weight the
/// bucket carried in fusion (0 when unavailable).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceSignal {
    pub signal: Signal,
    pub confidence: f64,
    pub weight: f64,
    pub available: bool,
}

impl SourceSignal {
    /// An available bucket output; confidence is clamped to [0, 100]
    pub fn new(signal: Signal, confidence: f64) -> Self {
        Self {
            signal,
            confidence: crate::signals::scoring::clamp_confidence(confidence),
            weight: 0.0,
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            signal: Signal::Neutral,
            confidence: 0.0,
            weight: 0.0,
            available: false,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetType {
    High,
    Low,
}

/// Gated outcome of a fusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSignal {
    pub signal: Signal,
    pub confidence: f64,
    pub target_price: Option<f64>,
    pub target_type: Option<TargetType>,
    pub meets_threshold: bool,
    /// Advisory display marker, never used for gating
    pub high_confidence: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub strategy: SourceSignal,
    pub ml: SourceSignal,
    pub news: SourceSignal,
}

impl Breakdown {
    pub fn get(&self, kind: BucketKind) -> &SourceSignal {
        match kind {
            BucketKind::Strategy => &self.strategy,
            BucketKind::Ml => &self.ml,
            BucketKind::News => &self.news,
        }
    }

    pub fn get_mut(&mut self, kind: BucketKind) -> &mut SourceSignal {
        match kind {
            BucketKind::Strategy => &mut self.strategy,
            BucketKind::Ml => &mut self.ml,
            BucketKind::News => &mut self.news,
        }
    }
}

impl Default for Breakdown {
    fn default() -> Self {
        Self {
            strategy: SourceSignal::unavailable(),
            ml: SourceSignal::unavailable(),
            news: SourceSignal::unavailable(),
        }
    }
}

/// Result of the fusion engine alone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionOutcome {
    pub current_price: f64,
    pub final_signal: FinalSignal,
    pub breakdown: Breakdown,
}

/// One prediction for a (coin, timeframe, candle-close) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedPrediction {
    pub coin: String,
    pub timeframe: Timeframe,
    /// Open time of the last closed candle the strategies were evaluated on
    pub candle_timestamp: DateTime<Utc>,
    pub current_price: f64,
    pub atr: Option<f64>,
    #[serde(rename = "final")]
    pub final_signal: FinalSignal,
    pub breakdown: Breakdown,
    pub strategies: Vec<StrategySignal>,
}
