use crate::document::PreprocessedDocument;

/// Tunable constants for the document-adaptive damping factor. The defaults
/// reproduce the reference behavior; the thresholds are heuristic and may
/// need recalibration per corpus, so they are parameters rather than
/// hard-coded invariants.
#[derive(Debug, Clone)]
pub struct DampingConfig {
    pub base: f64,
    /// Below this many sentences, add `short_adjust`.
    pub short_doc_sentences: usize,
    pub short_adjust: f64,
    /// Above this many sentences, add `long_adjust`.
    pub long_doc_sentences: usize,
    pub long_adjust: f64,
    /// Key-term density above this adds `dense_adjust`.
    pub dense_terms: f64,
    pub dense_adjust: f64,
    /// Key-term density below this adds `sparse_adjust`.
    pub sparse_terms: f64,
    pub sparse_adjust: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self {
            base: 0.85,
            short_doc_sentences: 5,
            short_adjust: 0.05,
            long_doc_sentences: 20,
            long_adjust: -0.05,
            dense_terms: 3.0,
            dense_adjust: -0.03,
            sparse_terms: 1.0,
            sparse_adjust: 0.03,
            min: 0.70,
            max: 0.95,
        }
    }
}

/// Estimate a damping factor from sentence count and key-term density.
/// Adjustments are additive and independent, then clamped. The caller
/// guarantees at least one sentence.
pub fn estimate(config: &DampingConfig, doc: &PreprocessedDocument) -> f64 {
    debug_assert!(doc.sentence_count() > 0);
    let n = doc.sentence_count();
    let density = doc.key_term_density();

    let mut d = config.base;
    if n < config.short_doc_sentences {
        d += config.short_adjust;
    }
    if n > config.long_doc_sentences {
        d += config.long_adjust;
    }
    if density > config.dense_terms {
        d += config.dense_adjust;
    }
    if density < config.sparse_terms {
        d += config.sparse_adjust;
    }
    d.clamp(config.min, config.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SentenceRecord;
    use std::collections::HashSet;

    fn doc(sentence_count: usize, key_term_count: usize) -> PreprocessedDocument {
        let sentences = (0..sentence_count)
            .map(|i| SentenceRecord {
                index: i,
                text: format!("sentence {i}."),
                tokens: vec![format!("term{i}")],
                normalized: vec![format!("term{i}")],
                pos_tags: vec!["NNG".to_string()],
            })
            .collect();
        let key_terms: HashSet<String> = (0..key_term_count).map(|i| format!("k{i}")).collect();
        PreprocessedDocument { sentences, key_terms }
    }

    #[test]
    fn neutral_document_keeps_the_base() {
        // 10 sentences, density 2.0: no threshold fires.
        assert_eq!(estimate(&DampingConfig::default(), &doc(10, 20)), 0.85);
    }

    #[test]
    fn short_and_sparse_adjustments_stack() {
        // 3 sentences (+0.05), density 0 (+0.03).
        let d = estimate(&DampingConfig::default(), &doc(3, 0));
        assert!((d - 0.93).abs() < 1e-12);
    }

    #[test]
    fn long_and_dense_adjustments_stack() {
        // 25 sentences (-0.05), density 4 (-0.03).
        let d = estimate(&DampingConfig::default(), &doc(25, 100));
        assert!((d - 0.77).abs() < 1e-12);
    }

    #[test]
    fn output_stays_in_bounds() {
        let config = DampingConfig::default();
        for n in 1..=40 {
            for terms in [0usize, 1, 5, 50, 500] {
                let d = estimate(&config, &doc(n, terms));
                assert!((0.70..=0.95).contains(&d), "n={n} terms={terms} d={d}");
            }
        }
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let config = DampingConfig { base: 0.90, short_doc_sentences: 2, ..Default::default() };
        // 1 sentence (+0.05) with zero density (+0.03) would exceed 0.95.
        assert_eq!(estimate(&config, &doc(1, 0)), 0.95);
    }
}
