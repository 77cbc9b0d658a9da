//! Strategy identifiers and per-strategy outputs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::signal::Signal;

/// The six technical strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Rsi,
    EmaCrossover,
    Macd,
    Bollinger,
    VolumeSpike,
    SupportResistance,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Rsi,
        StrategyKind::EmaCrossover,
        StrategyKind::Macd,
        StrategyKind::Bollinger,
        StrategyKind::VolumeSpike,
        StrategyKind::SupportResistance,
    ];

    /// Configuration identifier
    pub fn id(&self) -> &'static str {
        match self {
            StrategyKind::Rsi => "rsi",
            StrategyKind::EmaCrossover => "ema_crossover",
            StrategyKind::Macd => "macd",
            StrategyKind::Bollinger => "bollinger",
            StrategyKind::VolumeSpike => "volume_spike",
            StrategyKind::SupportResistance => "support_resistance",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyKind::Rsi => "RSI",
            StrategyKind::EmaCrossover => "EMA Crossover",
            StrategyKind::Macd => "MACD",
            StrategyKind::Bollinger => "Bollinger Bands",
            StrategyKind::VolumeSpike => "Volume Spike",
            StrategyKind::SupportResistance => "Support/Resistance",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        StrategyKind::ALL
            .iter()
            .find(|k| k.id() == needle)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

/// Output of one strategy evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySignal {
    pub strategy: StrategyKind,
    pub signal: Signal,
    pub confidence: f64,
    /// False when indicator data was not yet available
    pub available: bool,
    pub reason: String,
    /// Indicator values the rule read
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, f64>,
}

impl StrategySignal {
    pub fn new(strategy: StrategyKind, signal: Signal, confidence: f64, reason: String) -> Self {
        Self {
            strategy,
            signal,
            confidence: crate::signals::scoring::clamp_confidence(confidence),
            available: true,
            reason,
            details: BTreeMap::new(),
        }
    }

    /// NEUTRAL / zero confidence placeholder for missing indicator data
    pub fn insufficient_data(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            signal: Signal::Neutral,
            confidence: 0.0,
            available: false,
            reason: "indicator data not yet available".to_string(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, name: &str, value: f64) -> Self {
        self.details.insert(name.to_string(), value);
        self
    }
}
