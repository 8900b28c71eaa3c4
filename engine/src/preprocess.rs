use crate::document::{PreprocessedDocument, SentenceRecord};
use crate::error::{Error, Result};
use crate::language::LanguageCode;
use crate::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

/// POS tag used when token records are produced locally instead of by a
/// tagging backend.
const UNTAGGED: &str = "UNK";

#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Forwarded to the backend; when true the backend returns token arrays
    /// with stopwords already removed.
    pub remove_stopwords: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self { remove_stopwords: true }
    }
}

/// Language preprocessing capability: given raw text, return sentences with
/// aligned token annotations plus the document's key terms. The only
/// suspension point in a summarization request lives behind this trait.
pub trait Preprocessor: Send + Sync {
    fn preprocess(
        &self,
        lang: LanguageCode,
        text: &str,
        options: &PreprocessOptions,
    ) -> impl Future<Output = Result<PreprocessedDocument>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackendRequest<'a> {
    text: &'a str,
    remove_stopwords: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendSentence {
    index: usize,
    sentence: String,
    tokens: Vec<String>,
    normalized: Vec<String>,
    pos_tags: Vec<String>,
    #[serde(default)]
    token_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendResponse {
    #[serde(default)]
    sentences: Vec<String>,
    #[serde(default)]
    processed_sentences: Vec<BackendSentence>,
    #[serde(default)]
    key_terms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BackendError {
    error: String,
}

/// Where the per-language preprocessing services live and how long to wait
/// for them.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub ko_url: String,
    pub en_url: String,
    pub timeout: Duration,
}

/// HTTP client over the preprocessing backends. One shared `reqwest::Client`
/// is built at construction and reused read-only across requests; language
/// dispatch is an exhaustive match over `LanguageCode`, never a runtime
/// lookup table.
#[derive(Debug, Clone)]
pub struct HttpPreprocessor {
    client: reqwest::Client,
    ko_url: String,
    en_url: String,
}

impl HttpPreprocessor {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::PreprocessingUnavailable(format!("http client: {e}")))?;
        Ok(Self {
            client,
            ko_url: config.ko_url.trim_end_matches('/').to_string(),
            en_url: config.en_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, lang: LanguageCode) -> String {
        let base = match lang {
            LanguageCode::Ko => &self.ko_url,
            LanguageCode::En => &self.en_url,
        };
        format!("{base}/preprocess-for-textrank")
    }
}

impl Preprocessor for HttpPreprocessor {
    fn preprocess(
        &self,
        lang: LanguageCode,
        text: &str,
        options: &PreprocessOptions,
    ) -> impl Future<Output = Result<PreprocessedDocument>> + Send {
        let remove_stopwords = options.remove_stopwords;
        async move {
            if text.trim().is_empty() {
                return Err(Error::InvalidInput("text must be a non-empty string".into()));
            }

            let resp = self
                .client
                .post(self.endpoint(lang))
                .json(&BackendRequest { text, remove_stopwords })
                .send()
                .await?;

            let status = resp.status();
            if status.is_client_error() {
                let msg = resp
                    .json::<BackendError>()
                    .await
                    .map(|e| e.error)
                    .unwrap_or_else(|_| format!("backend rejected request ({status})"));
                return Err(Error::InvalidInput(msg));
            }
            if !status.is_success() {
                return Err(Error::PreprocessingUnavailable(format!(
                    "{} backend returned {status}",
                    lang.as_str()
                )));
            }

            let payload: BackendResponse = resp.json().await?;
            normalize_response(lang, text, remove_stopwords, payload)
        }
    }
}

/// Reduce a backend payload to the canonical document shape. Tolerates
/// backends that skip failed sentences (records are re-numbered by position)
/// and backends that return sentence boundaries without token records (local
/// tokenization fills in); misaligned token arrays are a contract violation.
fn normalize_response(
    lang: LanguageCode,
    text: &str,
    remove_stopwords: bool,
    payload: BackendResponse,
) -> Result<PreprocessedDocument> {
    let records = if !payload.processed_sentences.is_empty() {
        records_from_backend(payload.processed_sentences)?
    } else {
        let sentences = if payload.sentences.is_empty() {
            tracing::debug!(lang = lang.as_str(), "backend sent no sentence boundaries, splitting locally");
            tokenize::split_sentences(text)
        } else {
            payload.sentences
        };
        records_from_plain_sentences(lang, sentences, remove_stopwords)
    };

    if records.is_empty() {
        return Err(Error::PreprocessingUnavailable(format!(
            "{} backend produced an empty document for non-empty text",
            lang.as_str()
        )));
    }

    let key_terms = if payload.key_terms.is_empty() {
        derive_key_terms(lang, &records)
    } else {
        payload.key_terms.iter().map(|t| tokenize::fold(t)).collect()
    };

    PreprocessedDocument::new(records, key_terms)
}

fn records_from_backend(mut sentences: Vec<BackendSentence>) -> Result<Vec<SentenceRecord>> {
    sentences.sort_by_key(|s| s.index);
    let mut records = Vec::with_capacity(sentences.len());
    for s in sentences {
        if s.text_is_blank() {
            continue;
        }
        if s.tokens.len() != s.normalized.len() || s.tokens.len() != s.pos_tags.len() {
            return Err(Error::ComputationFault(format!(
                "backend sentence {}: tokens/normalized/posTags lengths diverge ({}/{}/{})",
                s.index,
                s.tokens.len(),
                s.normalized.len(),
                s.pos_tags.len()
            )));
        }
        if let Some(count) = s.token_count {
            if count != s.tokens.len() {
                return Err(Error::ComputationFault(format!(
                    "backend sentence {}: tokenCount {count} != {} tokens",
                    s.index,
                    s.tokens.len()
                )));
            }
        }
        records.push(SentenceRecord {
            index: records.len(),
            text: s.sentence.trim().to_string(),
            tokens: s.tokens,
            normalized: s.normalized.iter().map(|t| tokenize::fold(t)).collect(),
            pos_tags: s.pos_tags,
        });
    }
    Ok(records)
}

impl BackendSentence {
    fn text_is_blank(&self) -> bool {
        self.sentence.trim().is_empty()
    }
}

fn records_from_plain_sentences(
    lang: LanguageCode,
    sentences: Vec<String>,
    remove_stopwords: bool,
) -> Vec<SentenceRecord> {
    let mut records = Vec::new();
    for sentence in sentences {
        let trimmed = sentence.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut tokens = Vec::new();
        let mut normalized = Vec::new();
        for (surface, norm) in tokenize::tokenize(lang, trimmed) {
            if remove_stopwords && tokenize::is_stopword(lang, &norm) {
                continue;
            }
            tokens.push(surface);
            normalized.push(norm);
        }
        let pos_tags = vec![UNTAGGED.to_string(); tokens.len()];
        records.push(SentenceRecord {
            index: records.len(),
            text: trimmed.to_string(),
            tokens,
            normalized,
            pos_tags,
        });
    }
    records
}

/// Key terms from POS-tagged records: content-bearing tags only, stopwords
/// out. Untagged (locally tokenized) records fall back to the stopword
/// filter alone.
fn derive_key_terms(lang: LanguageCode, records: &[SentenceRecord]) -> HashSet<String> {
    let mut terms = HashSet::new();
    for record in records {
        for (norm, tag) in record.normalized.iter().zip(&record.pos_tags) {
            let content_bearing = if tag == UNTAGGED { true } else { tokenize::is_content_pos(tag) };
            if content_bearing && !tokenize::is_stopword(lang, norm) {
                terms.insert(norm.clone());
            }
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_sentence(index: usize, text: &str, words: &[(&str, &str)]) -> BackendSentence {
        BackendSentence {
            index,
            sentence: text.to_string(),
            tokens: words.iter().map(|(w, _)| w.to_string()).collect(),
            normalized: words.iter().map(|(w, _)| w.to_lowercase()).collect(),
            pos_tags: words.iter().map(|(_, t)| t.to_string()).collect(),
            token_count: Some(words.len()),
        }
    }

    #[test]
    fn normalizes_a_full_backend_payload() {
        let payload = BackendResponse {
            sentences: vec!["그래프 요약.".into(), "문장 선택.".into()],
            processed_sentences: vec![
                backend_sentence(0, "그래프 요약.", &[("그래프", "NNG"), ("요약", "NNG")]),
                backend_sentence(1, "문장 선택.", &[("문장", "NNG"), ("선택", "NNG")]),
            ],
            key_terms: vec!["그래프".into(), "요약".into(), "문장".into(), "선택".into()],
        };
        let doc = normalize_response(LanguageCode::Ko, "그래프 요약. 문장 선택.", true, payload).unwrap();
        assert_eq!(doc.sentence_count(), 2);
        assert_eq!(doc.key_terms.len(), 4);
        assert_eq!(doc.sentences[1].index, 1);
    }

    #[test]
    fn renumbers_records_when_the_backend_skips_a_sentence() {
        let payload = BackendResponse {
            sentences: vec![],
            processed_sentences: vec![
                backend_sentence(0, "First.", &[("first", "NNG")]),
                backend_sentence(2, "Third.", &[("third", "NNG")]),
            ],
            key_terms: vec![],
        };
        let doc = normalize_response(LanguageCode::En, "First. Second. Third.", true, payload).unwrap();
        assert_eq!(doc.sentence_count(), 2);
        assert_eq!(doc.sentences[1].index, 1);
        assert_eq!(doc.sentences[1].text, "Third.");
    }

    #[test]
    fn misaligned_arrays_are_a_computation_fault() {
        let mut bad = backend_sentence(0, "A b.", &[("a", "NNG"), ("b", "NNG")]);
        bad.normalized.pop();
        let payload =
            BackendResponse { sentences: vec![], processed_sentences: vec![bad], key_terms: vec![] };
        let err = normalize_response(LanguageCode::En, "A b.", true, payload).unwrap_err();
        assert!(matches!(err, Error::ComputationFault(_)));
    }

    #[test]
    fn wrong_token_count_is_a_computation_fault() {
        let mut bad = backend_sentence(0, "A b.", &[("a", "NNG"), ("b", "NNG")]);
        bad.token_count = Some(5);
        let payload =
            BackendResponse { sentences: vec![], processed_sentences: vec![bad], key_terms: vec![] };
        let err = normalize_response(LanguageCode::En, "A b.", true, payload).unwrap_err();
        assert!(matches!(err, Error::ComputationFault(_)));
    }

    #[test]
    fn falls_back_to_local_tokenization_for_plain_sentences() {
        let payload = BackendResponse {
            sentences: vec!["The ranking graph converges.".into(), "Scores order the sentences.".into()],
            processed_sentences: vec![],
            key_terms: vec![],
        };
        let doc = normalize_response(
            LanguageCode::En,
            "The ranking graph converges. Scores order the sentences.",
            true,
            payload,
        )
        .unwrap();
        assert_eq!(doc.sentence_count(), 2);
        // "the" filtered per removeStopwords, remaining tokens stemmed.
        assert!(doc.sentences[0].normalized.contains(&"converg".to_string()));
        assert!(!doc.sentences[0].normalized.iter().any(|t| t == "the"));
        assert!(doc.sentences[0].pos_tags.iter().all(|t| t == UNTAGGED));
        assert!(doc.key_terms.contains("graph"));
    }

    #[test]
    fn splits_locally_when_the_backend_offers_no_boundaries() {
        let payload = BackendResponse { sentences: vec![], processed_sentences: vec![], key_terms: vec![] };
        let doc =
            normalize_response(LanguageCode::En, "One part here. Another part there.", true, payload)
                .unwrap();
        assert_eq!(doc.sentence_count(), 2);
        assert_eq!(doc.sentences[0].text, "One part here.");
    }

    #[test]
    fn key_terms_keep_only_content_pos() {
        let payload = BackendResponse {
            sentences: vec![],
            processed_sentences: vec![backend_sentence(
                0,
                "요약 알고리즘 은 문장 을 선택 한다.",
                &[
                    ("요약", "NNG"),
                    ("알고리즘", "NNG"),
                    ("은", "JX"),
                    ("문장", "NNG"),
                    ("을", "JKO"),
                    ("선택", "NNG"),
                    ("한다", "VV"),
                ],
            )],
            key_terms: vec![],
        };
        let doc = normalize_response(LanguageCode::Ko, "요약 알고리즘은 문장을 선택한다.", false, payload)
            .unwrap();
        assert!(doc.key_terms.contains("요약"));
        assert!(doc.key_terms.contains("한다"));
        assert!(!doc.key_terms.contains("은"));
        assert!(!doc.key_terms.contains("을"));
    }

    #[test]
    fn empty_normalized_output_is_unavailable_not_empty_document() {
        let payload = BackendResponse {
            sentences: vec!["   ".into()],
            processed_sentences: vec![],
            key_terms: vec![],
        };
        let err = normalize_response(LanguageCode::En, "   x", true, payload).unwrap_err();
        assert!(matches!(err, Error::PreprocessingUnavailable(_)));
    }
}
