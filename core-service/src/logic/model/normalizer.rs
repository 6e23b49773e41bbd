//! Score Normalizer
//!
//! Map continuity score (~ -0.5..0.5, thấp = bất thường) sang [0, 1].

use crate::error::{Result, ScoringError};

/// Raw score that maps to anomaly 0
const NORMAL_CEILING: f64 = 0.5;

/// Half-width of the expected raw score spread
const SPREAD: f64 = 0.5;

/// `clip((0.5 - raw) / 0.5, 0, 1)`; NaN and infinities are rejected
pub fn normalize(raw_score: f64) -> Result<f64> {
    if !raw_score.is_finite() {
        return Err(ScoringError::NonFiniteScore(raw_score));
    }
    Ok(((NORMAL_CEILING - raw_score) / SPREAD).clamp(0.0, 1.0))
}
