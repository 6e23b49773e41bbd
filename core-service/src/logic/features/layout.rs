//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Change the bucketing digest → increment FEATURE_VERSION
//!
//! A trained model remembers the layout hash it was fit under and refuses
//! vectors encoded under any other layout.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "hour",       // 0: Hour of day of the event, 0-23
    "event_type", // 1: SHA-256(eventType) mod 1000
    "ip_hash",    // 2: SHA-256(ip) mod 1000
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 3;

/// Number of buckets for hashed string features
pub const HASH_BUCKETS: u32 = 1000;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout a model was fit under; carried by the forest and reported in `ModelInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub features: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            features: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Reject a vector tagged with another version or hash
    pub fn check(&self, version: u8, hash: u32) -> Result<()> {
        if version != self.version || hash != self.hash {
            return Err(ScoringError::LayoutMismatch {
                expected_version: self.version,
                expected_hash: self.hash,
                actual_version: version,
                actual_hash: hash,
            });
        }
        Ok(())
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<()> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(ScoringError::LayoutMismatch {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());
        assert!(validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
    }

    #[test]
    fn test_layout_info_check() {
        let info = LayoutInfo::current();
        assert_eq!(info.features, vec!["hour", "event_type", "ip_hash"]);
        assert!(info.check(FEATURE_VERSION, layout_hash()).is_ok());

        let err = info.check(FEATURE_VERSION, 7).unwrap_err();
        assert_eq!(
            err,
            ScoringError::LayoutMismatch {
                expected_version: FEATURE_VERSION,
                expected_hash: layout_hash(),
                actual_version: FEATURE_VERSION,
                actual_hash: 7,
            }
        );
    }
}
