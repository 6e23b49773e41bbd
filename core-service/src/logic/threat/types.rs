//! Threat Types
//!
//! Core types cho severity classification.
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

use super::rules::ALERT_THRESHOLD;

// ============================================================================
// SEVERITY
// ============================================================================

/// Severity tiers, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Hành vi bình thường
    Low,
    /// Lệch nhẹ so với bình thường
    Medium,
    /// Rủi ro cao, cần kiểm tra
    High,
    /// Bất thường nghiêm trọng
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SCORE RESULT
// ============================================================================

/// Outcome of scoring one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Normalized anomaly score (0.0 - 1.0, higher = more anomalous)
    pub anomaly_score: f64,
    pub severity: Severity,
    pub explanation: String,
}

impl ScoreResult {
    /// Whether the score crosses the alerting line used on ingest
    pub fn requires_alert(&self) -> bool {
        self.anomaly_score > ALERT_THRESHOLD
    }
}

// ============================================================================
// TRAIN SUMMARY
// ============================================================================

/// Outcome of a successful retrain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSummary {
    pub message: String,
    pub samples: usize,
}
