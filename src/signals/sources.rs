//! The three fusion inputs behind one trait

use crate::config::Config;
use crate::error::PredictionError;
use crate::models::signal::{BucketKind, SourceSignal};
use crate::models::strategy::StrategySignal;
use crate::signals::aggregation::StrategyAggregator;
use crate::signals::ml::{EnsembleOutput, MlSignalAdapter};
use crate::signals::news::{NewsSentimentAggregator, SentimentSnapshot};

/// A producer of one bucket's signal
///
/// `Err(SourceUnavailable)` marks a bucket that had no usable input; fusion
/// renormalizes around it.
pub trait SignalSource {
    fn kind(&self) -> BucketKind;

    fn produce(&self, config: &Config) -> Result<SourceSignal, PredictionError>;
}

/// Strategy bucket over already-evaluated strategy signals
pub struct StrategySource<'a> {
    signals: &'a [StrategySignal],
}

impl<'a> StrategySource<'a> {
    pub fn new(signals: &'a [StrategySignal]) -> Self {
        Self { signals }
    }
}

impl SignalSource for StrategySource<'_> {
    fn kind(&self) -> BucketKind {
        BucketKind::Strategy
    }

    fn produce(&self, config: &Config) -> Result<SourceSignal, PredictionError> {
        StrategyAggregator::aggregate(self.signals, config)
            .ok_or(PredictionError::SourceUnavailable(BucketKind::Strategy))
    }
}

pub struct MlSource<'a> {
    ensemble: Option<&'a EnsembleOutput>,
}

impl<'a> MlSource<'a> {
    pub fn new(ensemble: Option<&'a EnsembleOutput>) -> Self {
        Self { ensemble }
    }
}

impl SignalSource for MlSource<'_> {
    fn kind(&self) -> BucketKind {
        BucketKind::Ml
    }

    fn produce(&self, config: &Config) -> Result<SourceSignal, PredictionError> {
        self.ensemble
            .and_then(|e| MlSignalAdapter::adapt(e, &config.ml))
            .ok_or(PredictionError::SourceUnavailable(BucketKind::Ml))
    }
}

pub struct NewsSource<'a> {
    snapshot: &'a SentimentSnapshot,
}

impl<'a> NewsSource<'a> {
    pub fn new(snapshot: &'a SentimentSnapshot) -> Self {
        Self { snapshot }
    }
}

impl SignalSource for NewsSource<'_> {
    fn kind(&self) -> BucketKind {
        BucketKind::News
    }

    fn produce(&self, config: &Config) -> Result<SourceSignal, PredictionError> {
        NewsSentimentAggregator::aggregate(self.snapshot, &config.news)
            .ok_or(PredictionError::SourceUnavailable(BucketKind::News))
    }
}

/// A bucket whose signal is already known
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    kind: BucketKind,
    signal: Option<SourceSignal>,
}

impl FixedSource {
    pub fn new(kind: BucketKind, signal: Option<SourceSignal>) -> Self {
        Self { kind, signal }
    }
}

impl SignalSource for FixedSource {
    fn kind(&self) -> BucketKind {
        self.kind
    }

    fn produce(&self, _config: &Config) -> Result<SourceSignal, PredictionError> {
        self.signal.ok_or(PredictionError::SourceUnavailable(self.kind))
    }
}
