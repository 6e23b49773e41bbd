//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::layout::{layout_hash, validate_layout, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
use crate::error::{Result, ScoringError};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Encoded event: `(hour, event_type, ip_hash)` plus layout metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [u32; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(hour: u32, event_type_code: u32, ip_code: u32) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [hour, event_type_code, ip_code],
        }
    }

    pub fn hour(&self) -> u32 {
        self.values[0]
    }

    pub fn event_type_code(&self) -> u32 {
        self.values[1]
    }

    pub fn ip_code(&self) -> u32 {
        self.values[2]
    }

    /// Values as model input
    pub fn to_f64(&self) -> [f64; FEATURE_COUNT] {
        self.values.map(f64::from)
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<()> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Layout tag plus named values, for error logs
    pub fn to_log_entry(&self) -> serde_json::Value {
        let values: serde_json::Map<String, serde_json::Value> = FEATURE_LAYOUT
            .iter()
            .zip(self.values)
            .map(|(name, value)| (name.to_string(), value.into()))
            .collect();

        serde_json::json!({
            "layout": format!("v{}/{:08x}", self.version, self.layout_hash),
            "values": values,
        })
    }
}

// ============================================================================
// TRAINING MATRIX
// ============================================================================

/// One row per training event, `FEATURE_COUNT` columns
#[derive(Debug, Clone)]
pub struct TrainingMatrix {
    data: Array2<f64>,
}

impl TrainingMatrix {
    /// Build from encoded vectors; empty input is rejected
    pub fn from_vectors(vectors: &[FeatureVector]) -> Result<Self> {
        if vectors.is_empty() {
            return Err(ScoringError::EmptyTrainingSet);
        }

        let mut data = Array2::<f64>::zeros((vectors.len(), FEATURE_COUNT));
        for (i, vector) in vectors.iter().enumerate() {
            vector.validate()?;
            for (j, value) in vector.to_f64().into_iter().enumerate() {
                data[[i, j]] = value;
            }
        }

        Ok(Self { data })
    }

    /// Synthetic startup matrix: one row per hour, hashed features zero
    pub fn bootstrap(hours: u32) -> Self {
        let mut data = Array2::<f64>::zeros((hours.max(1) as usize, FEATURE_COUNT));
        for h in 0..hours {
            data[[h as usize, 0]] = f64::from(h);
        }
        Self { data }
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, row: usize, feature: usize) -> f64 {
        self.data[[row, feature]]
    }

    pub fn row(&self, row: usize) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (j, slot) in out.iter_mut().enumerate() {
            *slot = self.data[[row, j]];
        }
        out
    }
}
