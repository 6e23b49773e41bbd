//! Severity Rules & Thresholds
//!
//! Định nghĩa các threshold cho phân loại severity.
//! KHÔNG chứa logic classify - chỉ constants.
//!
//! Every threshold is an exclusive lower bound: a score exactly on a
//! boundary belongs to the tier below.

// ============================================================================
// THRESHOLDS (Constants - không đổi lúc runtime)
// ============================================================================

/// Above this score = Critical
pub const CRITICAL_THRESHOLD: f64 = 0.8;

/// Above this score = High
pub const HIGH_THRESHOLD: f64 = 0.6;

/// Above this score = Medium, otherwise Low
pub const MEDIUM_THRESHOLD: f64 = 0.4;

/// Above this score the ingest side records an anomaly and raises an alert
pub const ALERT_THRESHOLD: f64 = 0.6;

// ============================================================================
// EXPLANATIONS
// ============================================================================

pub const HIGH_EXPLANATION_PREFIX: &str = "High risk: Unusual pattern detected for";

pub const MEDIUM_EXPLANATION: &str = "Moderate deviation from normal behavior";

pub const LOW_EXPLANATION: &str = "Normal activity detected.";

pub fn critical_explanation(event_type: &str, hour: u32, ip: &str) -> String {
    format!("Critical anomaly: Unusual {} at {}:00 from {}", event_type, hour, ip)
}

pub fn high_explanation(user_id: &str) -> String {
    format!("{} {}", HIGH_EXPLANATION_PREFIX, user_id)
}
