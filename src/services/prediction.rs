//! Prediction service: gathers provider data and runs the prediction engine

use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ProviderError, ServiceError};
use crate::models::signal::FusedPrediction;
use crate::models::timeframe::Timeframe;
use crate::services::inference::ModelInferenceProvider;
use crate::services::market_data::MarketDataProvider;
use crate::services::sentiment::SentimentProvider;
use crate::signals::engine::{EvaluationInput, PredictionEngine};
use crate::signals::news::SentimentSnapshot;

/// Timeouts, retries and fetch sizes for provider calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Per-attempt timeout
    pub timeout_ms: u64,
    /// Retries after the first attempt
    pub max_retries: usize,
    pub min_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub candle_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            max_retries: 3,
            min_backoff_ms: 100,
            max_backoff_ms: 2_000,
            candle_limit: 200,
        }
    }
}

/// Outcome for one requested key of `predict_many`
#[derive(Debug)]
pub struct KeyedPrediction {
    pub coin: String,
    pub timeframe: Timeframe,
    pub result: Result<FusedPrediction, ServiceError>,
}

pub struct PredictionService {
    market_data: Arc<dyn MarketDataProvider>,
    inference: Arc<dyn ModelInferenceProvider>,
    sentiment: Arc<dyn SentimentProvider>,
    config: Config,
    settings: ServiceSettings,
}

impl PredictionService {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        inference: Arc<dyn ModelInferenceProvider>,
        sentiment: Arc<dyn SentimentProvider>,
        config: Config,
    ) -> Self {
        Self {
            market_data,
            inference,
            sentiment,
            config,
            settings: ServiceSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gather candles, model output and sentiment concurrently, then evaluate
    ///
    /// A candle failure fails the key. ML and sentiment failures degrade the
    /// bucket to unavailable.
    pub async fn predict(
        &self,
        coin: &str,
        timeframe: Timeframe,
        as_of: DateTime<Utc>,
    ) -> Result<FusedPrediction, ServiceError> {
        let limit = self.settings.candle_limit;
        let (candles, ml, polarity, fear_greed) = tokio::join!(
            self.fetch("market_data", || self.market_data.get_candles(coin, timeframe, limit)),
            self.fetch("inference", || self.inference.predict(coin, timeframe)),
            self.fetch("sentiment", || self.sentiment.polarity(coin)),
            self.fetch("fear_greed", || self.sentiment.fear_greed()),
        );

        let candles = candles?;
        let ml = degrade(ml, coin, "inference");
        let sentiment = SentimentSnapshot::new(
            degrade(polarity, coin, "sentiment"),
            degrade(fear_greed, coin, "fear_greed"),
        );

        let input = EvaluationInput {
            coin: coin.to_string(),
            timeframe,
            as_of,
            candles,
            ml,
            sentiment,
        };
        Ok(PredictionEngine::evaluate(&input, &self.config)?)
    }

    /// Evaluate many keys concurrently; results keep the order of `keys`
    pub async fn predict_many(&self, keys: &[(String, Timeframe)], as_of: DateTime<Utc>) -> Vec<KeyedPrediction> {
        info!(keys = keys.len(), "Evaluating predictions");
        join_all(keys.iter().map(|(coin, timeframe)| async move {
            KeyedPrediction {
                coin: coin.clone(),
                timeframe: *timeframe,
                result: self.predict(coin, *timeframe, as_of).await,
            }
        }))
        .await
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(self.settings.min_backoff_ms))
            .with_max_delay(Duration::from_millis(self.settings.max_backoff_ms))
            .with_max_times(self.settings.max_retries)
    }

    /// One provider call with a per-attempt timeout and retry on transient errors
    async fn fetch<T, F, Fut>(&self, provider: &'static str, mut call: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let millis = self.settings.timeout_ms;
        let timeout = Duration::from_millis(millis);

        (|| {
            let attempt = call();
            async move {
                match tokio::time::timeout(timeout, attempt).await {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout { provider, millis }),
                }
            }
        })
        .retry(self.backoff())
        .when(ProviderError::is_retryable)
        .notify(|err: &ProviderError, delay: Duration| {
            warn!(provider, error = %err, retry_in_ms = delay.as_millis() as u64, "Provider call failed, retrying");
        })
        .await
    }
}

fn degrade<T>(result: Result<Option<T>, ProviderError>, coin: &str, provider: &'static str) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(coin, provider, error = %err, "Source unavailable, continuing without it");
            None
        }
    }
}
