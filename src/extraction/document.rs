//! Document aggregator: runs every extractor over one text.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::annotation::{AnnotatedDocument, NlpBackend};
use super::entity_extractor::{extract_entities, extract_entities_fallback, Entity};
use super::formats::detect_format;
use super::keywords::{extract_keywords, extract_keywords_fallback, Keyword};
use super::log::{global_log, DocumentLog, DocumentRecord, DocumentStats};
use super::relation_extractor::{extract_relations, Relation};
use super::summarizer::{summarize, text_prefix, Summary, DEFAULT_MAX_SENTENCES};
use crate::config::Config;
use crate::{metrics, Error, Result};

/// Structured knowledge extracted from one text. Write-once.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    entities: Vec<Entity>,
    relations: Vec<Relation>,
    keywords: Vec<Keyword>,
    summary: Summary,
    source: String,
    processed_at: DateTime<Utc>,
}

impl ProcessedDocument {
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn processed_at(&self) -> DateTime<Utc> {
        self.processed_at
    }

    /// Map form: `{entities, relations, keywords, summary, source, processed_at}`.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Processed document plus the record appended to the document log.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingReport {
    #[serde(flatten)]
    pub document: ProcessedDocument,
    pub document_info: DocumentRecord,
}

/// Runs extraction over texts and records each one in a [`DocumentLog`].
pub struct DocumentProcessor {
    backend: NlpBackend,
    log: Arc<dyn DocumentLog>,
    max_sentences: usize,
}

impl DocumentProcessor {
    /// Processor writing to the process-wide log.
    pub fn new(backend: NlpBackend) -> Self {
        Self::with_log(backend, global_log())
    }

    /// Processor writing to its own log.
    pub fn with_log(backend: NlpBackend, log: Arc<dyn DocumentLog>) -> Self {
        Self {
            backend,
            log,
            max_sentences: DEFAULT_MAX_SENTENCES,
        }
    }

    pub fn from_config(config: &Config, backend: NlpBackend) -> Self {
        Self::new(backend).with_max_sentences(config.max_summary_sentences)
    }

    pub fn with_max_sentences(mut self, max_sentences: usize) -> Self {
        self.max_sentences = max_sentences;
        self
    }

    pub fn backend(&self) -> &NlpBackend {
        &self.backend
    }

    pub fn log(&self) -> &Arc<dyn DocumentLog> {
        &self.log
    }

    /// Extract entities, relations, keywords and a summary from `text`.
    pub fn process(&self, text: &str, source: &str) -> ProcessedDocument {
        self.process_with_info(text, source).document
    }

    /// Same as [`process`](Self::process), also returning the log record.
    pub fn process_with_info(&self, text: &str, source: &str) -> ProcessingReport {
        let document = match self.backend.annotate(text) {
            Some(doc) => self.run_annotated(&doc, source),
            None => self.run_lexical(text, source),
        };

        let record = DocumentRecord {
            source: source.to_string(),
            processed_at: document.processed_at,
            entities_count: document.entities.len(),
            relations_count: document.relations.len(),
            word_count: text.split_whitespace().count(),
            file_type: detect_format(source),
        };
        self.log.append(record.clone());

        info!(
            source,
            entities = record.entities_count,
            relations = record.relations_count,
            keywords = document.keywords.len(),
            "Processed document"
        );

        ProcessingReport {
            document,
            document_info: record,
        }
    }

    /// Statistics folded over this processor's log.
    pub fn stats(&self) -> DocumentStats {
        self.log.stats()
    }

    fn run_annotated(&self, doc: &AnnotatedDocument, source: &str) -> ProcessedDocument {
        metrics::record_document("annotated");

        let entities = run_stage("entities", || Ok(extract_entities(&doc.entities)));
        let relations = run_stage("relations", || extract_relations(doc));
        let keywords = run_stage("keywords", || Ok(extract_keywords(doc)));
        let summary = self.run_summary(&doc.text);

        ProcessedDocument {
            entities: entities.unwrap_or_default(),
            relations: relations.unwrap_or_default(),
            keywords: keywords.unwrap_or_default(),
            summary,
            source: source.to_string(),
            processed_at: Utc::now(),
        }
    }

    fn run_lexical(&self, text: &str, source: &str) -> ProcessedDocument {
        metrics::record_document("lexical");
        debug!(source, "No annotator available, using lexical extraction");

        let entities = run_stage("entities", || Ok(extract_entities_fallback(text)));
        let keywords = run_stage("keywords", || Ok(extract_keywords_fallback(text)));
        let summary = self.run_summary(text);

        ProcessedDocument {
            entities: entities.unwrap_or_default(),
            relations: Vec::new(),
            keywords: keywords.unwrap_or_default(),
            summary,
            source: source.to_string(),
            processed_at: Utc::now(),
        }
    }

    fn run_summary(&self, text: &str) -> Summary {
        run_stage("summary", || Ok(summarize(text, self.max_sentences)))
            .unwrap_or_else(|| text_prefix(text))
    }
}

/// Run one extraction stage; any error or panic becomes `None`.
fn run_stage<T>(stage: &'static str, f: impl FnOnce() -> Result<T>) -> Option<T> {
    let start = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|_| Err(Error::Unknown(format!("{stage} stage panicked"))));
    metrics::record_stage(stage, start.elapsed(), outcome.is_ok());

    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(stage, "Extraction stage failed, returning empty result ({err})");
            None
        }
    }
}
