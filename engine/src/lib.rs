//! Extractive summarization engine: language detection, preprocessing-backend
//! normalization, sentence-similarity graph construction, adaptive-damping
//! TextRank propagation, and summary extraction. All state is request-scoped;
//! the preprocessing HTTP call is the only suspension point.

pub mod damping;
pub mod document;
pub mod error;
pub mod extract;
pub mod graph;
pub mod language;
pub mod pipeline;
pub mod preprocess;
pub mod rank;
pub mod tokenize;

pub use document::{PreprocessedDocument, SentenceRecord};
pub use error::{Error, Result};
pub use language::LanguageCode;
pub use pipeline::{Pipeline, PipelineConfig, SummarizeRequest, SummaryResponse};
pub use preprocess::{BackendConfig, HttpPreprocessor, PreprocessOptions, Preprocessor};
