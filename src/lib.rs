//! Confluence: fuses technical strategies, ML class probabilities and news
//! sentiment into one confidence-gated trading signal per coin and timeframe.

pub mod common;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
pub mod strategies;

pub use config::Config;
pub use error::{ConfigError, PredictionError, ProviderError, ServiceError};
pub use models::{FusedPrediction, Signal, Timeframe};
pub use signals::{EvaluationInput, PredictionEngine};
