//! Volume indicators: rolling volume baseline

pub mod volume_sma;

pub use volume_sma::*;
