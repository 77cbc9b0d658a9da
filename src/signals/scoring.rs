//! Confidence normalization shared by every signal source

/// Clamp a confidence to [0, 100]; non-finite values read as 0
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Map a probability in [0, 1] to a confidence in [0, 100]
pub fn probability_to_confidence(probability: f64) -> f64 {
    clamp_confidence(probability * 100.0)
}

/// Map a signed score in [-1, 1] to a confidence from its magnitude
pub fn score_to_confidence(score: f64) -> f64 {
    clamp_confidence(score.abs() * 100.0)
}

/// Normalize a value to the -1 to +1 range given its natural bounds
pub fn normalize_score(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    let normalized = 2.0 * ((value - min) / (max - min)) - 1.0;
    normalized.clamp(-1.0, 1.0)
}

/// Fear & greed index (0 = extreme fear, 100 = extreme greed) to [-1, 1]
pub fn normalize_fear_greed(index: u8) -> f64 {
    normalize_score(f64::from(index.min(100)), 0.0, 100.0)
}

/// Renormalize weights so they sum to 1.0; all-zero input stays zero
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights
        .iter()
        .map(|w| if *w > 0.0 { w / total } else { 0.0 })
        .collect()
}
