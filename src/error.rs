//! Error types for the prediction pipeline

use thiserror::Error;

use crate::models::signal::BucketKind;

/// Errors surfaced by the prediction core.
///
/// Per-strategy and per-bucket problems are absorbed as NEUTRAL / unavailable
/// outputs; only the variants below ever reach a caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Fewer candles than the evaluation can work with at all
    #[error("Insufficient data: {available} candles available, {required} required")]
    InsufficientData { required: usize, available: usize },

    /// A bucket had no input for this evaluation
    #[error("Signal source unavailable: {0}")]
    SourceUnavailable(BucketKind),

    /// Strategy, ML and News were all unavailable
    #[error("No signal sources available")]
    NoSignalSources,

    /// Configuration rejected at load time
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigError),
}

/// Configuration validation and loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration: {field} must be a finite, non-negative number (got {value})")]
    InvalidWeight { field: &'static str, value: f64 },

    #[error("Invalid configuration: at least one source weight must be positive")]
    ZeroWeights,

    #[error("Invalid configuration: {field} must be within [0, 100] (got {value})")]
    ThresholdOutOfRange { field: &'static str, value: f64 },

    #[error("Invalid configuration: atr_multiplier must be positive (got {0})")]
    InvalidAtrMultiplier(f64),

    #[error("Invalid configuration: unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error("Invalid configuration: {0}")]
    InvalidParameter(String),

    #[error("Invalid configuration: could not parse {key}='{value}'")]
    Parse { key: String, value: String },

    #[error("Configuration file error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

/// Errors raised by external data providers at the service boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("{provider} timed out after {millis}ms")]
    Timeout { provider: &'static str, millis: u64 },

    #[error("{provider} fetch failed: {message}")]
    Fetch {
        provider: &'static str,
        message: String,
    },

    #[error("No data for {coin}/{timeframe}")]
    NotFound { coin: String, timeframe: String },
}

impl ProviderError {
    /// Transient failures are retried; a missing key is not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderError::NotFound { .. })
    }
}

/// Errors from the prediction service (boundary + core)
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}
