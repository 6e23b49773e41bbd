//! Isolation Tree
//!
//! Cây phân hoạch ngẫu nhiên. Node được lưu phẳng trong một `Vec`,
//! con trỏ con là index.

use rand::Rng;

use crate::logic::features::{TrainingMatrix, FEATURE_COUNT};

/// Euler-Mascheroni constant
const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Average path length of an unsuccessful BST search over `n` points
///
/// `c(n) = 2H(n-1) - 2(n-1)/n`, with `c(2) = 1` and `c(n) = 0` for `n <= 1`.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// One randomized binary partition tree
#[derive(Debug, Clone)]
pub struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    /// Grow a tree over `rows` of `matrix`, at most `max_depth` splits deep
    pub fn build<R: Rng>(
        matrix: &TrainingMatrix,
        mut rows: Vec<usize>,
        max_depth: usize,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(matrix, &mut rows, 0, max_depth, rng);
        tree
    }

    fn grow<R: Rng>(
        &mut self,
        matrix: &TrainingMatrix,
        rows: &mut [usize],
        depth: usize,
        max_depth: usize,
        rng: &mut R,
    ) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf { size: rows.len() });

        if rows.len() <= 1 || depth >= max_depth {
            return index;
        }

        // Only features that still vary at this node can separate rows
        let mut candidates: Vec<(usize, f64, f64)> = Vec::with_capacity(FEATURE_COUNT);
        for feature in 0..matrix.n_features() {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                let v = matrix.get(r, feature);
                (lo.min(v), hi.max(v))
            });
            if hi > lo {
                candidates.push((feature, lo, hi));
            }
        }

        if candidates.is_empty() {
            return index;
        }

        let (feature, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
        let mut threshold = lo + rng.gen::<f64>() * (hi - lo);
        if threshold >= hi {
            threshold = lo;
        }

        // lo <= threshold < hi, so both sides are non-empty
        let mut split_at = 0;
        for i in 0..rows.len() {
            if matrix.get(rows[i], feature) <= threshold {
                rows.swap(i, split_at);
                split_at += 1;
            }
        }

        let (left_rows, right_rows) = rows.split_at_mut(split_at);
        let left = self.grow(matrix, left_rows, depth + 1, max_depth, rng);
        let right = self.grow(matrix, right_rows, depth + 1, max_depth, rng);

        self.nodes[index] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        index
    }

    /// Edges from root to the leaf holding `x`, plus `c(leaf size)`
    pub fn path_length(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut index = 0;
        let mut depth = 0usize;

        loop {
            match &self.nodes[index] {
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[*feature] <= *threshold { *left } else { *right };
                    depth += 1;
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Longest root-to-leaf edge count
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match &nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}
