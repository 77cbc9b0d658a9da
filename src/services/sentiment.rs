use async_trait::async_trait;

use crate::error::ProviderError;

#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Average headline polarity for a coin, roughly -1 to +1
    async fn polarity(&self, coin: &str) -> Result<Option<f64>, ProviderError>;

    /// Market-wide fear & greed index, 0 to 100
    async fn fear_greed(&self) -> Result<Option<u8>, ProviderError>;
}
