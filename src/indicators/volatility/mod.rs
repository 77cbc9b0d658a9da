//! Volatility indicators: Bollinger Bands, ATR

pub mod bollinger;
pub mod atr;

pub use bollinger::*;
pub use atr::*;

