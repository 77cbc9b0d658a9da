//! Async provider boundary and the prediction service.

pub mod inference;
pub mod market_data;
pub mod prediction;
pub mod sentiment;
pub mod snapshot;

pub use inference::ModelInferenceProvider;
pub use market_data::MarketDataProvider;
pub use prediction::{KeyedPrediction, PredictionService, ServiceSettings};
pub use sentiment::SentimentProvider;
pub use snapshot::{MarketEntry, MarketSnapshot, SnapshotProvider};
