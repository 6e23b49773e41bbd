//! Severity Classifier
//!
//! CHỈ chứa logic classify - không có types, không có policy.
//! Input: normalized anomaly score, Event, hour
//! Output: (Severity, explanation)

use super::rules::{
    critical_explanation, high_explanation, CRITICAL_THRESHOLD, HIGH_THRESHOLD, LOW_EXPLANATION,
    MEDIUM_EXPLANATION, MEDIUM_THRESHOLD,
};
use super::types::Severity;
use crate::logic::features::Event;

/// Tier for a normalized score, evaluated top-down with strict `>`
pub fn severity_for(anomaly_score: f64) -> Severity {
    if anomaly_score > CRITICAL_THRESHOLD {
        Severity::Critical
    } else if anomaly_score > HIGH_THRESHOLD {
        Severity::High
    } else if anomaly_score > MEDIUM_THRESHOLD {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Main classification function
///
/// `hour` is the encoded hour of the event (after any clock fallback).
pub fn classify(anomaly_score: f64, event: &Event, hour: u32) -> (Severity, String) {
    let severity = severity_for(anomaly_score);

    let explanation = match severity {
        Severity::Critical => critical_explanation(&event.event_type, hour, &event.ip),
        Severity::High => high_explanation(&event.user_id),
        Severity::Medium => MEDIUM_EXPLANATION.to_string(),
        Severity::Low => LOW_EXPLANATION.to_string(),
    };

    (severity, explanation)
}

// ============================================================================
// TESTS
// ============================================================================
