use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One sentence with positionally aligned token annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// 0-based position in the document.
    pub index: usize,
    /// Original surface form, non-empty after trimming.
    pub text: String,
    pub tokens: Vec<String>,
    /// Normalized form of each token, same length as `tokens`.
    pub normalized: Vec<String>,
    /// One POS tag per token, same length as `tokens`.
    pub pos_tags: Vec<String>,
}

impl SentenceRecord {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Immutable per-request view of a preprocessed text: ordered sentences plus
/// the document's content-bearing key terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessedDocument {
    pub sentences: Vec<SentenceRecord>,
    /// Case-folded, stopword/POS-filtered normalized terms.
    pub key_terms: HashSet<String>,
}

impl PreprocessedDocument {
    /// Build a document, enforcing the structural invariants the rest of the
    /// engine relies on. Violations indicate a broken backend payload.
    pub fn new(sentences: Vec<SentenceRecord>, key_terms: HashSet<String>) -> Result<Self> {
        for (pos, s) in sentences.iter().enumerate() {
            if s.index != pos {
                return Err(Error::ComputationFault(format!(
                    "sentence index {} at position {pos}: indices must be contiguous from 0",
                    s.index
                )));
            }
            if s.text.trim().is_empty() {
                return Err(Error::ComputationFault(format!(
                    "sentence {pos} has empty surface text"
                )));
            }
            if s.tokens.len() != s.normalized.len() || s.tokens.len() != s.pos_tags.len() {
                return Err(Error::ComputationFault(format!(
                    "sentence {pos}: tokens/normalized/posTags lengths diverge ({}/{}/{})",
                    s.tokens.len(),
                    s.normalized.len(),
                    s.pos_tags.len()
                )));
            }
        }
        Ok(Self { sentences, key_terms })
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// len(keyTerms) / sentenceCount. Callers guarantee at least one sentence.
    pub fn key_term_density(&self) -> f64 {
        self.key_terms.len() as f64 / self.sentences.len() as f64
    }
}
