//! Market data provider interface

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::indicators::Candle;
use crate::models::timeframe::Timeframe;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Most recent `limit` candles for a coin, oldest first. The newest candle
    /// may still be forming.
    async fn get_candles(
        &self,
        coin: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError>;
}
