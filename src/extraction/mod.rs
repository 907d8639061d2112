//! Knowledge extraction from plain document text.
//!
//! A document goes through four small extractors and comes out as a
//! [`ProcessedDocument`]:
//! - entities from named-entity spans (or capitalized words without an annotator)
//! - relations from dependency edges between entities
//! - keywords ranked by a frequency/length/position heuristic
//! - an extractive summary that keeps document order
//!
//! Linguistic annotation is an external capability plugged in through
//! [`NlpBackend`]; without it the pipeline degrades to lexical heuristics.

pub mod annotation;
pub mod document;
pub mod entity_extractor;
pub mod formats;
pub mod keywords;
pub mod log;
pub mod relation_extractor;
pub mod summarizer;

pub use annotation::{
    AnnotatedDocument, AnnotatedToken, Annotator, EntitySpan, NlpBackend, NounChunk,
    PrecomputedAnnotator, TokenRange,
};
pub use document::{DocumentProcessor, ProcessedDocument, ProcessingReport};
pub use entity_extractor::{extract_entities, extract_entities_fallback, explain_label, Entity};
pub use formats::{allowed_file, detect_format, is_plain_text, is_supported_format};
pub use keywords::{extract_keywords, extract_keywords_fallback, keyword_importance, Keyword};
pub use log::{global_log, DocumentLog, DocumentRecord, DocumentStats, InMemoryDocumentLog};
pub use relation_extractor::{extract_relations, Relation};
pub use summarizer::{summarize, try_summarize, Summary};
