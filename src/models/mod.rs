//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;
pub mod strategy;
pub mod timeframe;

pub use indicators::{names, Candle, IndicatorSeries};
pub use signal::{
    Breakdown, BucketKind, FinalSignal, FusedPrediction, FusionOutcome, Signal, SourceSignal,
    TargetType,
};
pub use strategy::{StrategyKind, StrategySignal};
pub use timeframe::Timeframe;
