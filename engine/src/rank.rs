use crate::graph::SimilarityGraph;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Stop once the largest per-node score change in a sweep drops below this.
    pub tolerance: f64,
    /// Hard cap on sweeps; hitting it is a graceful degradation, not an error.
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self { tolerance: 1e-4, max_iterations: 100 }
    }
}

/// Scores plus iteration metadata. Scores are left as the update rule
/// produced them, with no renormalization: extraction only consumes relative
/// order, and the rule itself keeps the total near 1 on connected graphs.
#[derive(Debug, Clone, Serialize)]
pub struct RankOutcome {
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Iterative rank propagation (PageRank over sentence similarity).
/// score_i = (1-d)/N + d * Σ_j w(i,j) * score_j / degree_weight(j), with
/// isolated nodes contributing nothing.
pub fn propagate(graph: &SimilarityGraph, damping: f64, config: &RankConfig) -> RankOutcome {
    let n = graph.node_count();
    if n == 0 {
        return RankOutcome { scores: Vec::new(), iterations: 0, converged: true };
    }
    if n == 1 {
        return RankOutcome { scores: vec![1.0], iterations: 0, converged: true };
    }

    let degrees: Vec<f64> = (0..n).map(|i| graph.degree_weight(i)).collect();
    let base = (1.0 - damping) / n as f64;
    let mut scores = vec![1.0 / n as f64; n];
    let mut iterations = 0usize;
    let mut converged = false;

    while iterations < config.max_iterations {
        let mut next = vec![base; n];
        for j in 0..n {
            if degrees[j] <= f64::EPSILON {
                continue;
            }
            let share = damping * scores[j] / degrees[j];
            for &(i, w) in graph.neighbors(j) {
                next[i] += w * share;
            }
        }
        let max_delta = scores
            .iter()
            .zip(&next)
            .map(|(old, new)| (new - old).abs())
            .fold(0.0f64, f64::max);
        scores = next;
        iterations += 1;
        if max_delta < config.tolerance {
            converged = true;
            break;
        }
    }

    tracing::debug!(iterations, converged, "rank propagation finished");
    RankOutcome { scores, iterations, converged }
}
