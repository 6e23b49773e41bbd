//! Error handling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoringError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// Training was requested with no events
    #[error("No logs provided")]
    EmptyTrainingSet,

    /// The model produced NaN or infinity for a vector
    #[error("Non-finite anomaly score: {0}")]
    NonFiniteScore(f64),

    /// Vector was encoded under a different feature layout than the model
    #[error(
        "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})"
    )]
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },

    /// Model hyperparameters are out of range
    #[error("Invalid model config: {0}")]
    InvalidConfig(String),
}

impl ScoringError {
    /// Whether the caller sent a bad request (as opposed to an internal fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScoringError::EmptyTrainingSet)
    }
}
