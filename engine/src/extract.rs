use crate::document::PreprocessedDocument;
use crate::language::LanguageCode;
use crate::rank::RankOutcome;
use serde::Serialize;

pub const ALGORITHM_NAME: &str = "Extended TextRank";
pub const DEFAULT_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmMetadata {
    pub name: &'static str,
    pub damping_factor: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Extraction output: selected sentences in original document order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary_text: String,
    pub language: LanguageCode,
    pub original_length: usize,
    pub summary_length: usize,
    /// Ascending original indices, never rank order.
    pub selected_indices: Vec<usize>,
    pub algorithm: AlgorithmMetadata,
}

/// Number of sentences to keep for a document of `sentence_count` sentences.
/// The ratio is clamped into (0, 1] and the result floored at 1.
pub fn target_sentence_count(sentence_count: usize, ratio: f64) -> usize {
    let ratio = ratio.clamp(f64::MIN_POSITIVE, 1.0);
    let target = (sentence_count as f64 * ratio).round() as usize;
    target.clamp(1, sentence_count.max(1))
}

/// Pick the top-ranked sentences and emit them in document order. Ties break
/// toward the lower original index so selection is fully deterministic.
pub fn extract(
    doc: &PreprocessedDocument,
    ranks: &RankOutcome,
    damping: f64,
    ratio: f64,
    original_length: usize,
    language: LanguageCode,
) -> SummaryResult {
    let n = doc.sentence_count();
    let target = target_sentence_count(n, ratio);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        ranks.scores[b]
            .partial_cmp(&ranks.scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut selected: Vec<usize> = order.into_iter().take(target).collect();
    selected.sort_unstable();

    let summary_text = selected
        .iter()
        .map(|&i| doc.sentences[i].text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    SummaryResult {
        summary_length: summary_text.chars().count(),
        summary_text,
        language,
        original_length,
        selected_indices: selected,
        algorithm: AlgorithmMetadata {
            name: ALGORITHM_NAME,
            damping_factor: damping,
            iterations: ranks.iterations,
            converged: ranks.converged,
        },
    }
}
