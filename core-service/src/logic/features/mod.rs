//! Features Module - Feature Extraction Engine
//!
//! Tách logic encode event khỏi model.
//! Layout, event, clock, encoder và vector nằm ở các file riêng.

pub mod layout;
pub mod event;
pub mod clock;
pub mod encoder;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_VERSION};
pub use event::Event;
pub use clock::{Clock, FixedClock, SystemClock};
pub use encoder::{hash_bucket, parse_hour, FeatureEncoder};
pub use vector::{FeatureVector, TrainingMatrix};
