//! Document Knowledge Extraction Library
//!
//! This library turns plain document text into structured knowledge:
//! - Named entities with type descriptions and character spans
//! - Relations between entities inferred from dependency edges
//! - Keywords ranked by frequency, length and position
//! - Extractive summaries that keep document order
//! - Processing statistics over an append-only document log
//!
//! File decoding (PDF, DOCX, HTML) and linguistic annotation happen outside
//! this crate; annotations are consumed through the [`extraction::Annotator`] trait.

pub mod commands;
pub mod config;
pub mod error;
pub mod extraction;
pub mod metrics;

// Re-export common types
pub use config::Config;
pub use error::{Error, Result};
pub use extraction::{
    DocumentProcessor, DocumentStats, Entity, Keyword, NlpBackend, ProcessedDocument, Relation,
    Summary,
};
