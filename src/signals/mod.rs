//! Bucket adapters, fusion and the prediction pipeline.

pub mod aggregation;
pub mod engine;
pub mod fusion;
pub mod ml;
pub mod news;
pub mod scoring;
pub mod sources;
pub mod target;

pub use aggregation::{StrategyAggregator, VoteTally};
pub use engine::{EvaluationInput, PredictionEngine};
pub use fusion::FusionEngine;
pub use ml::{ClassProbabilities, EnsembleOutput, MlSignalAdapter, ModelPrediction};
pub use news::{NewsSentimentAggregator, SentimentSnapshot};
pub use sources::{FixedSource, MlSource, NewsSource, SignalSource, StrategySource};
pub use target::TargetCalculator;
