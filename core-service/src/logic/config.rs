//! Model Configuration
//!
//! Hyperparameters cho isolation forest. Defaults nằm trong `constants.rs`.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, ScoringError};

/// Isolation forest hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,

    /// Cap on rows sub-sampled per tree
    pub max_samples: usize,

    /// Expected fraction of anomalies, calibrates the score offset only
    pub contamination: f64,

    /// Seed for tree construction (`None` = OS entropy)
    pub random_seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_trees: constants::DEFAULT_N_TREES,
            max_samples: constants::DEFAULT_MAX_SAMPLES,
            contamination: constants::DEFAULT_CONTAMINATION,
            random_seed: Some(constants::DEFAULT_RANDOM_SEED),
        }
    }
}

impl ModelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            n_trees: constants::get_n_trees(),
            max_samples: constants::get_max_samples(),
            contamination: constants::get_contamination(),
            random_seed: constants::get_random_seed(),
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Reject hyperparameters the forest cannot be built with
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(ScoringError::InvalidConfig("n_trees must be at least 1".into()));
        }
        if self.max_samples == 0 {
            return Err(ScoringError::InvalidConfig("max_samples must be at least 1".into()));
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(ScoringError::InvalidConfig(format!(
                "contamination must be in (0, 0.5], got {}",
                self.contamination
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.n_trees, 100);
        assert_eq!(config.max_samples, 256);
        assert_eq!(config.contamination, 0.05);
        assert_eq!(config.random_seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ModelConfig::default().with_trees(0).validate().is_err());

        let config = ModelConfig { max_samples: 0, ..Default::default() };
        assert!(config.validate().is_err());

        for contamination in [0.0, -0.1, 0.51, f64::NAN] {
            let config = ModelConfig { contamination, ..Default::default() };
            assert!(
                matches!(config.validate(), Err(ScoringError::InvalidConfig(_))),
                "contamination {} should be rejected",
                contamination
            );
        }
    }

    #[test]
    fn test_serde_roundtrip_keeps_seed() {
        let config = ModelConfig::default().with_seed(None);
        let json = serde_json::to_string(&config).unwrap();
        let back: ModelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
