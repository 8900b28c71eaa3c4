use crate::damping::{self, DampingConfig};
use crate::error::{Error, Result};
use crate::extract::{self, AlgorithmMetadata, DEFAULT_RATIO};
use crate::graph::SimilarityGraph;
use crate::language::{self, LanguageCode};
use crate::preprocess::{PreprocessOptions, Preprocessor};
use crate::rank::{self, RankConfig};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Pipeline-facing request payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub text: String,
    /// Fraction of sentences to keep, in (0, 1]. Defaults to 0.3.
    pub ratio: Option<f64>,
    /// Pins the preprocessing backend, skipping detection.
    pub language: Option<LanguageCode>,
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceCounts {
    pub original: usize,
    pub summary: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// summaryLength / originalLength.
    pub compression: f64,
    pub sentence_token_counts: Vec<usize>,
    pub key_term_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: String,
    pub language: LanguageCode,
    pub original_length: usize,
    pub summary_length: usize,
    pub ratio: f64,
    pub selected_indices: Vec<usize>,
    pub sentences: SentenceCounts,
    pub algorithm: AlgorithmMetadata,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub damping: DampingConfig,
    pub rank: RankConfig,
}

/// The whole summarization flow in fixed order: validate, detect language,
/// preprocess, build the similarity graph, estimate damping, propagate
/// ranks, extract. Any stage failure aborts the request; there is no partial
/// summary. Holds only read-only state, so one instance serves concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct Pipeline<P> {
    preprocessor: P,
    config: PipelineConfig,
}

impl<P: Preprocessor> Pipeline<P> {
    pub fn new(preprocessor: P, config: PipelineConfig) -> Self {
        Self { preprocessor, config }
    }

    pub async fn run(&self, request: &SummarizeRequest) -> Result<SummaryResponse> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("text must be a non-empty string".into()));
        }
        let ratio = request.ratio.unwrap_or(DEFAULT_RATIO);
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(Error::InvalidInput(format!("ratio must be in (0, 1], got {ratio}")));
        }

        let lang = request.language.unwrap_or_else(|| language::detect(text));
        let options = PreprocessOptions { remove_stopwords: request.remove_stopwords };
        let doc = self.preprocessor.preprocess(lang, text, &options).await?;
        if doc.sentence_count() == 0 {
            return Err(Error::InvalidInput("text contains no sentences".into()));
        }

        let graph = SimilarityGraph::build(&doc);
        let damping_factor = damping::estimate(&self.config.damping, &doc);
        let ranks = rank::propagate(&graph, damping_factor, &self.config.rank);

        let original_length = text.chars().count();
        let result = extract::extract(&doc, &ranks, damping_factor, ratio, original_length, lang);

        tracing::info!(
            lang = lang.as_str(),
            sentences = doc.sentence_count(),
            selected = result.selected_indices.len(),
            damping = damping_factor,
            iterations = result.algorithm.iterations,
            converged = result.algorithm.converged,
            "summary extracted"
        );

        let compression = if original_length > 0 {
            result.summary_length as f64 / original_length as f64
        } else {
            0.0
        };
        Ok(SummaryResponse {
            sentences: SentenceCounts {
                original: doc.sentence_count(),
                summary: result.selected_indices.len(),
            },
            stats: SummaryStats {
                compression,
                sentence_token_counts: doc.sentences.iter().map(|s| s.token_count()).collect(),
                key_term_count: doc.key_terms.len(),
            },
            summary: result.summary_text,
            language: result.language,
            original_length: result.original_length,
            summary_length: result.summary_length,
            ratio,
            selected_indices: result.selected_indices,
            algorithm: result.algorithm,
        })
    }
}
