//! ATR-scaled price target for actionable signals

use crate::models::signal::{Signal, TargetType};

pub struct TargetCalculator;

impl TargetCalculator {
    /// `price ± atr × (confidence / 100) × multiplier`; `None` for NEUTRAL
    pub fn calculate(
        signal: Signal,
        price: f64,
        atr: f64,
        confidence: f64,
        multiplier: f64,
    ) -> Option<(f64, TargetType)> {
        let offset = atr.max(0.0) * (confidence / 100.0) * multiplier;
        match signal {
            Signal::Buy => Some((price + offset, TargetType::High)),
            Signal::Sell => Some((price - offset, TargetType::Low)),
            Signal::Neutral => None,
        }
    }
}
