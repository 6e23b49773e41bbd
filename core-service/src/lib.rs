//! Audit Anomaly Core
//!
//! Unsupervised anomaly scoring for security/audit log events.
//!
//! ```ignore
//! use audit_anomaly_core::{score, train, Event};
//!
//! let event = Event::new("login", "u1", "10.0.0.1", "HQ").with_timestamp("2024-01-15T03:00:00Z");
//! let result = score(&event)?;
//! println!("{} {:.2}: {}", result.severity, result.anomaly_score, result.explanation);
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{Result, ScoringError};
pub use logic::config::ModelConfig;
pub use logic::engine::{init, model_info, score, train, ScoringEngine};
pub use logic::features::{Clock, Event, FeatureEncoder, FeatureVector, FixedClock, SystemClock};
pub use logic::model::ModelInfo;
pub use logic::threat::{ScoreResult, Severity, TrainSummary};
