//! Logic Module - Business Logic & Engines
//!
//! Chứa pipeline chấm điểm: Features → Model → Threat, nối lại trong `engine`.
//!
//! - `features/` - Event encoding (hour, hashed event type, hashed ip)
//! - `model/` - Isolation forest, normalizer, model state
//! - `threat/` - Severity ladder and explanations

pub mod config;
pub mod engine;

pub mod features;
pub mod model;
pub mod threat;
