//! In-memory providers backed by a recorded market snapshot

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, ProviderError};
use crate::models::indicators::Candle;
use crate::models::timeframe::Timeframe;
use crate::services::inference::ModelInferenceProvider;
use crate::services::market_data::MarketDataProvider;
use crate::services::sentiment::SentimentProvider;
use crate::signals::ml::EnsembleOutput;

/// Candles and model output for one (coin, timeframe)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub coin: String,
    pub timeframe: Timeframe,
    pub candles: Vec<Candle>,
    #[serde(default)]
    pub ml: Option<EnsembleOutput>,
}

/// A point-in-time copy of every provider's data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Evaluation time recorded with the snapshot
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
    #[serde(default)]
    pub markets: Vec<MarketEntry>,
    /// Headline polarity per coin
    #[serde(default)]
    pub polarity: BTreeMap<String, f64>,
    #[serde(default)]
    pub fear_greed: Option<u8>,
}

impl MarketSnapshot {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Every (coin, timeframe) key in file order
    pub fn keys(&self) -> Vec<(String, Timeframe)> {
        self.markets
            .iter()
            .map(|m| (m.coin.clone(), m.timeframe))
            .collect()
    }

    fn entry(&self, coin: &str, timeframe: Timeframe) -> Option<&MarketEntry> {
        self.markets
            .iter()
            .find(|m| m.coin.eq_ignore_ascii_case(coin) && m.timeframe == timeframe)
    }
}

/// Serves all three provider traits from one snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    snapshot: MarketSnapshot,
}

impl SnapshotProvider {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &MarketSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl MarketDataProvider for SnapshotProvider {
    async fn get_candles(
        &self,
        coin: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let entry = self
            .snapshot
            .entry(coin, timeframe)
            .ok_or_else(|| ProviderError::NotFound {
                coin: coin.to_string(),
                timeframe: timeframe.to_string(),
            })?;

        let mut candles = entry.candles.clone();
        candles.sort_by_key(|c| c.timestamp);
        let start = candles.len().saturating_sub(limit);
        Ok(candles.split_off(start))
    }
}

#[async_trait]
impl ModelInferenceProvider for SnapshotProvider {
    async fn predict(&self, coin: &str, timeframe: Timeframe) -> Result<Option<EnsembleOutput>, ProviderError> {
        Ok(self
            .snapshot
            .entry(coin, timeframe)
            .and_then(|e| e.ml.clone()))
    }
}

#[async_trait]
impl SentimentProvider for SnapshotProvider {
    async fn polarity(&self, coin: &str) -> Result<Option<f64>, ProviderError> {
        Ok(self
            .snapshot
            .polarity
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(coin))
            .map(|(_, v)| *v))
    }

    async fn fear_greed(&self) -> Result<Option<u8>, ProviderError> {
        Ok(self.snapshot.fear_greed)
    }
}
