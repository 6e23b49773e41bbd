//! Threat Module
//!
//! Phân loại severity dựa trên anomaly score đã chuẩn hóa.
//!
//! ## Structure
//! - `types`: Core types (Severity, ScoreResult, TrainSummary)
//! - `rules`: Thresholds and explanation templates
//! - `classifier`: Classification logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::threat::{classify, Severity};
//!
//! let (severity, explanation) = classify(0.85, &event, 3);
//! match severity {
//!     Severity::Low | Severity::Medium => {}
//!     Severity::High | Severity::Critical => println!("{}", explanation),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod classifier;

// Re-export main types for convenience
pub use types::{ScoreResult, Severity, TrainSummary};

pub use rules::{ALERT_THRESHOLD, CRITICAL_THRESHOLD, HIGH_THRESHOLD, MEDIUM_THRESHOLD};

pub use classifier::{classify, severity_for};
