//! Isolation Forest - ensemble of random partition trees
//!
//! Điểm bất thường = độ dài đường đi trung bình qua các cây, chuẩn hóa
//! theo `c(ψ)`. Điểm càng thấp càng bất thường.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use super::tree::{average_path_length, IsolationTree};
use crate::error::{Result, ScoringError};
use crate::logic::config::ModelConfig;
use crate::logic::features::{FeatureVector, LayoutInfo, TrainingMatrix, FEATURE_COUNT};

/// Trained isolation forest. Immutable once built.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    sub_sample_size: usize,
    /// Contamination percentile of the training isolation scores
    offset: f64,
    layout: LayoutInfo,
}

impl IsolationForest {
    /// Build a new forest over `matrix`
    pub fn fit(matrix: &TrainingMatrix, config: &ModelConfig) -> Result<Self> {
        config.validate()?;

        let n_rows = matrix.n_rows();
        if n_rows == 0 {
            return Err(ScoringError::EmptyTrainingSet);
        }

        let mut rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let sub_sample_size = config.max_samples.min(n_rows);
        let max_depth = (sub_sample_size as f64).log2().ceil() as usize;

        let trees: Vec<IsolationTree> = (0..config.n_trees)
            .map(|_| {
                let rows = index::sample(&mut rng, n_rows, sub_sample_size).into_vec();
                IsolationTree::build(matrix, rows, max_depth, &mut rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            sub_sample_size,
            offset: 0.0,
            layout: LayoutInfo::current(),
        };

        let training_scores: Vec<f64> = (0..n_rows)
            .map(|r| forest.isolation_score_raw(&matrix.row(r)))
            .collect();
        forest.offset = percentile(training_scores, config.contamination * 100.0);

        log::debug!(
            "Isolation forest fit: {} trees, sub-sample {}, max depth {}, offset {:.4}",
            forest.trees.len(),
            sub_sample_size,
            max_depth,
            forest.offset
        );

        Ok(forest)
    }

    /// `-2^(-E[h(x)] / c(ψ))`, in `[-1, 0)`
    fn isolation_score_raw(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mean_path = self.trees.iter().map(|t| t.path_length(x)).sum::<f64>() / self.trees.len() as f64;
        let normalizer = average_path_length(self.sub_sample_size);

        // ψ = 1 gives c(ψ) = 0; every point then sits at ratio 1
        let ratio = if normalizer > 0.0 { mean_path / normalizer } else { 1.0 };

        -(2f64.powf(-ratio))
    }

    /// Isolation score before the contamination offset (lower = more anomalous)
    pub fn isolation_score(&self, vector: &FeatureVector) -> Result<f64> {
        self.layout.check(vector.version, vector.layout_hash)?;
        Ok(self.isolation_score_raw(&vector.to_f64()))
    }

    /// Continuity score centred on the contamination threshold
    ///
    /// Negative values are outliers, positive values inliers; roughly -0.5..0.5.
    pub fn score_samples(&self, vector: &FeatureVector) -> Result<f64> {
        Ok(self.isolation_score(vector)? - self.offset)
    }

    /// `true` when the vector falls below the contamination threshold
    pub fn predict(&self, vector: &FeatureVector) -> Result<bool> {
        Ok(self.score_samples(vector)? < 0.0)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn sub_sample_size(&self) -> usize {
        self.sub_sample_size
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.layout
    }
}

/// Percentile `q` (0-100) with linear interpolation between ranks
fn percentile(mut values: Vec<f64>, q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let rank = (q / 100.0).clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;

    values[lo] + (values[hi] - values[lo]) * (rank - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let values = vec![4.0, 1.0, 3.0, 2.0, 5.0];
        assert_eq!(percentile(values.clone(), 0.0), 1.0);
        assert_eq!(percentile(values.clone(), 100.0), 5.0);
        assert_eq!(percentile(values.clone(), 50.0), 3.0);
        assert!((percentile(values, 5.0) - 1.2).abs() < 1e-12);
        assert_eq!(percentile(vec![], 5.0), 0.0);
    }

    #[test]
    fn test_fit_rejects_invalid_config() {
        let matrix = TrainingMatrix::bootstrap(24);
        let config = ModelConfig::default().with_trees(0);
        assert!(matches!(
            IsolationForest::fit(&matrix, &config),
            Err(ScoringError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sub_sample_is_capped_by_rows() {
        let matrix = TrainingMatrix::bootstrap(24);
        let forest = IsolationForest::fit(&matrix, &ModelConfig::default()).unwrap();
        assert_eq!(forest.sub_sample_size(), 24);
        assert_eq!(forest.n_trees(), 100);
    }

    #[test]
    fn test_single_row_forest_is_finite() {
        let matrix = TrainingMatrix::from_vectors(&[FeatureVector::new(9, 1, 2)]).unwrap();
        let forest = IsolationForest::fit(&matrix, &ModelConfig::default()).unwrap();

        let score = forest.score_samples(&FeatureVector::new(3, 400, 500)).unwrap();
        assert!(score.is_finite());
        assert_eq!(forest.isolation_score(&FeatureVector::new(9, 1, 2)).unwrap(), -0.5);
    }

    #[test]
    fn test_scores_within_isolation_range() {
        let forest = IsolationForest::fit(&TrainingMatrix::bootstrap(24), &ModelConfig::default()).unwrap();
        for hour in 0..24 {
            let s = forest.isolation_score(&FeatureVector::new(hour, 0, 0)).unwrap();
            assert!((-1.0..0.0).contains(&s), "score {} out of range", s);
        }
    }

    #[test]
    fn test_layout_mismatch_is_rejected() {
        let forest = IsolationForest::fit(&TrainingMatrix::bootstrap(24), &ModelConfig::default()).unwrap();
        let mut vector = FeatureVector::new(1, 1, 1);
        vector.layout_hash ^= 0xffff;
        assert!(matches!(
            forest.score_samples(&vector),
            Err(ScoringError::LayoutMismatch { .. })
        ));
    }
}
