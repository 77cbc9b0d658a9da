//! Model inference provider interface

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::timeframe::Timeframe;
use crate::signals::ml::EnsembleOutput;

#[async_trait]
pub trait ModelInferenceProvider: Send + Sync {
    /// Ensemble class probabilities, `Ok(None)` when no model covers the key
    async fn predict(&self, coin: &str, timeframe: Timeframe) -> Result<Option<EnsembleOutput>, ProviderError>;
}
