//! Technical strategies that read indicator series and emit directional votes.

pub mod bollinger;
pub mod ema_crossover;
pub mod evaluator;
pub mod macd;
pub mod rsi;
pub mod support_resistance;
pub mod volume_spike;

pub use evaluator::StrategyEvaluator;
