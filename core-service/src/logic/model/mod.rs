//! Model Module - Anomaly Model
//!
//! Isolation forest, chuẩn hóa điểm và model state.
//! Model được fit lại toàn bộ mỗi lần train, không cập nhật từng phần.

pub mod tree;
pub mod forest;
pub mod normalizer;
pub mod state;


// Re-export common types
pub use forest::IsolationForest;
pub use normalizer::normalize;
pub use state::{ActiveModel, ModelInfo, ModelState};
