//! Append-only log of processed documents and the statistics folded from it.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Metadata kept for every processed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub source: String,
    pub processed_at: DateTime<Utc>,
    pub entities_count: usize,
    pub relations_count: usize,
    pub word_count: usize,
    /// Format tag, e.g. `.pdf` or `unknown`
    pub file_type: String,
}

/// Aggregate statistics over a document log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentStats {
    pub total_documents: usize,
    pub total_entities: usize,
    pub total_relations: usize,
    pub file_types: BTreeMap<String, usize>,
    pub processed_documents: Vec<DocumentRecord>,
}

impl DocumentStats {
    /// Fold a sequence of records into totals.
    pub fn from_records(records: Vec<DocumentRecord>) -> Self {
        let mut stats = records
            .iter()
            .fold(DocumentStats::default(), |mut stats, record| {
                stats.total_documents += 1;
                stats.total_entities += record.entities_count;
                stats.total_relations += record.relations_count;
                *stats.file_types.entry(record.file_type.clone()).or_insert(0) += 1;
                stats
            });
        stats.processed_documents = records;
        stats
    }
}

/// Narrow append/fold interface over the document log.
pub trait DocumentLog: Send + Sync {
    /// Append one complete record.
    fn append(&self, record: DocumentRecord);

    /// Copy of every record appended so far.
    fn snapshot(&self) -> Vec<DocumentRecord>;

    /// Drop all records. Only external owners reset the log.
    fn clear(&self);

    fn stats(&self) -> DocumentStats {
        DocumentStats::from_records(self.snapshot())
    }
}

/// In-process log guarded by a read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryDocumentLog {
    records: RwLock<Vec<DocumentRecord>>,
}

impl InMemoryDocumentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentLog for InMemoryDocumentLog {
    fn append(&self, record: DocumentRecord) {
        match self.records.write() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => {
                warn!("Document log lock poisoned, recovering");
                poisoned.into_inner().push(record);
            }
        }
    }

    fn snapshot(&self) -> Vec<DocumentRecord> {
        match self.records.read() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn clear(&self) {
        match self.records.write() {
            Ok(mut records) => records.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

static GLOBAL_LOG: Lazy<Arc<InMemoryDocumentLog>> =
    Lazy::new(|| Arc::new(InMemoryDocumentLog::new()));

/// Process-wide log shared by processors that were not given their own.
pub fn global_log() -> Arc<InMemoryDocumentLog> {
    Arc::clone(&GLOBAL_LOG)
}
