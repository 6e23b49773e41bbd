//! Model State - holder of the active model
//!
//! Luôn có đúng một model đang hoạt động. Train tạo model mới rồi swap
//! `Arc`, không bao giờ sửa model đang được đọc.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::forest::IsolationForest;
use crate::constants::BOOTSTRAP_HOURS;
use crate::error::Result;
use crate::logic::config::ModelConfig;
use crate::logic::features::{LayoutInfo, TrainingMatrix};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Metadata of the active model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_id: Uuid,
    pub trained_at: DateTime<Utc>,
    /// Rows in the matrix the model was fit on
    pub samples: usize,
    /// `false` while the synthetic startup model is serving
    pub is_trained: bool,
    pub n_trees: usize,
    /// Feature layout the forest accepts
    pub layout: LayoutInfo,
}

/// A fitted forest together with its metadata
#[derive(Debug)]
pub struct ActiveModel {
    pub forest: IsolationForest,
    pub info: ModelInfo,
}

impl ActiveModel {
    fn new(forest: IsolationForest, samples: usize, is_trained: bool) -> Self {
        let info = ModelInfo {
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            samples,
            is_trained,
            n_trees: forest.n_trees(),
            layout: forest.layout().clone(),
        };
        Self { forest, info }
    }
}

// ============================================================================
// STATE
// ============================================================================

/// Single-slot, atomically replaced model holder
#[derive(Debug)]
pub struct ModelState {
    active: RwLock<Arc<ActiveModel>>,
}

impl ModelState {
    /// Fit the startup model on the hour-sweep matrix so scoring works immediately
    pub fn bootstrap(config: &ModelConfig) -> Result<Self> {
        let matrix = TrainingMatrix::bootstrap(BOOTSTRAP_HOURS);
        let forest = IsolationForest::fit(&matrix, config)?;
        let model = ActiveModel::new(forest, matrix.n_rows(), false);

        log::info!(
            "Bootstrap model {} ready ({} synthetic rows, {} trees)",
            model.info.model_id,
            model.info.samples,
            model.info.n_trees
        );

        Ok(Self {
            active: RwLock::new(Arc::new(model)),
        })
    }

    /// Snapshot of the active model; stays valid across later swaps
    pub fn current(&self) -> Arc<ActiveModel> {
        Arc::clone(&*self.active.read())
    }

    /// Install a freshly fitted forest, returning its metadata
    pub fn replace(&self, forest: IsolationForest, samples: usize) -> ModelInfo {
        let model = Arc::new(ActiveModel::new(forest, samples, true));
        let info = model.info.clone();

        let previous = std::mem::replace(&mut *self.active.write(), model);
        log::debug!("Model {} replaced by {}", previous.info.model_id, info.model_id);

        info
    }

    pub fn info(&self) -> ModelInfo {
        self.active.read().info.clone()
    }
}
