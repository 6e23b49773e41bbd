//! Central Configuration Constants
//!
//! Single source of truth for all model defaults.
//! To change a default hyperparameter, only edit this file.

/// Default number of trees in the isolation forest
pub const DEFAULT_N_TREES: usize = 100;

/// Default cap on rows drawn per tree
///
/// Each tree sees `min(DEFAULT_MAX_SAMPLES, n)` rows of the training matrix.
pub const DEFAULT_MAX_SAMPLES: usize = 256;

/// Default expected fraction of anomalies in a training batch
pub const DEFAULT_CONTAMINATION: f64 = 0.05;

/// Default random seed (refits over the same batch are reproducible)
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Number of bootstrap rows (one per hour of day)
pub const BOOTSTRAP_HOURS: u32 = 24;

/// Message returned after a successful retrain
pub const TRAIN_SUCCESS_MESSAGE: &str = "Model trained successfully";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Environment variable names
// ============================================

pub const ENV_N_TREES: &str = "ANOMALY_N_TREES";
pub const ENV_MAX_SAMPLES: &str = "ANOMALY_MAX_SAMPLES";
pub const ENV_CONTAMINATION: &str = "ANOMALY_CONTAMINATION";
pub const ENV_RANDOM_SEED: &str = "ANOMALY_RANDOM_SEED";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get tree count from environment or use default
pub fn get_n_trees() -> usize {
    std::env::var(ENV_N_TREES)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_N_TREES)
}

/// Get per-tree sample cap from environment or use default
pub fn get_max_samples() -> usize {
    std::env::var(ENV_MAX_SAMPLES)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_SAMPLES)
}

/// Get contamination from environment or use default
pub fn get_contamination() -> f64 {
    std::env::var(ENV_CONTAMINATION)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CONTAMINATION)
}

/// Get random seed from environment or use default
///
/// `none` (any case) disables seeding, trees are then drawn from OS entropy.
pub fn get_random_seed() -> Option<u64> {
    match std::env::var(ENV_RANDOM_SEED) {
        Ok(s) if s.trim().eq_ignore_ascii_case("none") => None,
        Ok(s) => Some(s.trim().parse().unwrap_or(DEFAULT_RANDOM_SEED)),
        Err(_) => Some(DEFAULT_RANDOM_SEED),
    }
}
