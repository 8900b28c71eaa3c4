use crate::document::PreprocessedDocument;
use std::collections::HashSet;

/// Undirected weighted sentence-similarity graph in sparse adjacency form.
/// Nodes are sentence indices 0..N-1; absent edges read as weight 0.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    node_count: usize,
    /// adjacency[i] holds (j, weight) for every j with weight(i, j) > 0.
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl SimilarityGraph {
    /// Compute pairwise similarities over normalized token sets. A pair's
    /// weight is |shared terms| / (ln(max(len_i, 2)) + ln(max(len_j, 2))),
    /// clamped to 1.0; zero-overlap pairs are not stored.
    pub fn build(doc: &PreprocessedDocument) -> Self {
        let n = doc.sentence_count();
        let term_sets: Vec<HashSet<&str>> = doc
            .sentences
            .iter()
            .map(|s| s.normalized.iter().map(String::as_str).collect())
            .collect();

        let mut adjacency = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let w = similarity(&term_sets[i], &term_sets[j]);
                if w > 0.0 {
                    adjacency[i].push((j, w));
                    adjacency[j].push((i, w));
                }
            }
        }
        Self { node_count: n, adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn neighbors(&self, i: usize) -> &[(usize, f64)] {
        &self.adjacency[i]
    }

    /// Sum of a node's edge weights; 0 for isolated nodes.
    pub fn degree_weight(&self, i: usize) -> f64 {
        self.adjacency[i].iter().map(|(_, w)| w).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

fn similarity(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let shared = a.intersection(b).count();
    if shared == 0 {
        return 0.0;
    }
    // Floor each set size at 2 so ln never yields 0 in the denominator.
    let denom = (a.len().max(2) as f64).ln() + (b.len().max(2) as f64).ln();
    (shared as f64 / denom).min(1.0)
}
