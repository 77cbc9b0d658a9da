//! ML bucket: soft-voted class probabilities from an external model ensemble

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::MlParams;
use crate::models::signal::{Signal, SourceSignal};
use crate::signals::scoring::probability_to_confidence;

/// Class probabilities reported by one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassProbabilities {
    Ternary { buy: f64, sell: f64, neutral: f64 },
    Binary { up: f64 },
}

impl ClassProbabilities {
    /// Normalized copy, or `None` for negative, non-finite or all-zero vectors
    pub fn normalized(&self) -> Option<Self> {
        match *self {
            ClassProbabilities::Ternary { buy, sell, neutral } => {
                let values = [buy, sell, neutral];
                if values.iter().any(|p| !p.is_finite() || *p < 0.0) {
                    return None;
                }
                let total: f64 = values.iter().sum();
                if total <= 0.0 {
                    return None;
                }
                Some(ClassProbabilities::Ternary {
                    buy: buy / total,
                    sell: sell / total,
                    neutral: neutral / total,
                })
            }
            ClassProbabilities::Binary { up } => {
                if !up.is_finite() || !(0.0..=1.0).contains(&up) {
                    return None;
                }
                Some(ClassProbabilities::Binary { up })
            }
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, ClassProbabilities::Binary { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub model: String,
    pub probabilities: ClassProbabilities,
}

impl ModelPrediction {
    pub fn ternary(model: &str, buy: f64, sell: f64, neutral: f64) -> Self {
        Self {
            model: model.to_string(),
            probabilities: ClassProbabilities::Ternary { buy, sell, neutral },
        }
    }

    pub fn binary(model: &str, up: f64) -> Self {
        Self {
            model: model.to_string(),
            probabilities: ClassProbabilities::Binary { up },
        }
    }
}

/// Output of a model ensemble for one (coin, timeframe)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnsembleOutput {
    pub models: Vec<ModelPrediction>,
}

impl EnsembleOutput {
    pub fn new(models: Vec<ModelPrediction>) -> Self {
        Self { models }
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

pub struct MlSignalAdapter;

impl MlSignalAdapter {
    /// Soft vote over the ensemble, `None` when no valid vector remains
    ///
    /// Ternary vectors are averaged class-wise. Binary vectors are averaged on
    /// `up`. A mixed ensemble maps binary models onto the ternary classes
    /// (`up` as buy, `1 - up` as sell).
    pub fn adapt(ensemble: &EnsembleOutput, params: &MlParams) -> Option<SourceSignal> {
        let valid: Vec<ClassProbabilities> = ensemble
            .models
            .iter()
            .filter_map(|m| match m.probabilities.normalized() {
                Some(p) => Some(p),
                None => {
                    warn!(model = %m.model, "Skipping invalid probability vector");
                    None
                }
            })
            .collect();
        if valid.is_empty() {
            return None;
        }

        let count = valid.len() as f64;
        if valid.iter().all(ClassProbabilities::is_binary) {
            let up = valid
                .iter()
                .map(|p| match p {
                    ClassProbabilities::Binary { up } => *up,
                    ClassProbabilities::Ternary { .. } => 0.0,
                })
                .sum::<f64>()
                / count;
            return Some(Self::from_binary(up, params.binary_neutral_band));
        }

        let (mut buy, mut sell, mut neutral) = (0.0, 0.0, 0.0);
        for p in &valid {
            match *p {
                ClassProbabilities::Ternary { buy: b, sell: s, neutral: n } => {
                    buy += b;
                    sell += s;
                    neutral += n;
                }
                ClassProbabilities::Binary { up } => {
                    buy += up;
                    sell += 1.0 - up;
                }
            }
        }
        Some(Self::from_ternary(buy / count, sell / count, neutral / count))
    }

    /// Argmax class; ties resolve to NEUTRAL
    pub fn from_ternary(buy: f64, sell: f64, neutral: f64) -> SourceSignal {
        if buy > sell && buy > neutral {
            SourceSignal::new(Signal::Buy, probability_to_confidence(buy))
        } else if sell > buy && sell > neutral {
            SourceSignal::new(Signal::Sell, probability_to_confidence(sell))
        } else {
            SourceSignal::new(Signal::Neutral, probability_to_confidence(neutral.max(buy).max(sell)))
        }
    }

    pub fn from_binary(up: f64, neutral_band: f64) -> SourceSignal {
        let distance = (up - 0.5).abs();
        if distance <= neutral_band {
            SourceSignal::new(Signal::Neutral, distance * 200.0)
        } else if up > 0.5 {
            SourceSignal::new(Signal::Buy, probability_to_confidence(up))
        } else {
            SourceSignal::new(Signal::Sell, probability_to_confidence(1.0 - up))
        }
    }
}
