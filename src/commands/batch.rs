//! `batch` command: process every plain-text file under a directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::process::{backend_for, read_plain_text, source_id};
use crate::extraction::{is_plain_text, DocumentLog, InMemoryDocumentLog};
use crate::{Config, DocumentProcessor, DocumentStats};

/// Arguments of the `batch` command.
#[derive(Debug, Clone)]
pub struct BatchArgs {
    pub dir: PathBuf,
    /// Overrides `annotations_dir` from the config
    pub annotations_dir: Option<PathBuf>,
}

/// Stats for the processed files plus everything that was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub stats: DocumentStats,
    pub skipped: Vec<PathBuf>,
}

/// Plain-text files under `dir`, sorted for a stable processing order.
pub fn collect_files(dir: &Path, recursive: bool) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let walker = WalkDir::new(dir)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut files = Vec::new();
    let mut skipped = Vec::new();

    for entry in walker.into_iter().filter_map(|e| match e {
        Ok(entry) => Some(entry),
        Err(err) => {
            warn!("Skipping unreadable entry: {}", err);
            None
        }
    }) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if is_plain_text(&path.to_string_lossy()) {
            files.push(path);
        } else {
            debug!("Skipping {} (not plain text)", path.display());
            skipped.push(path);
        }
    }

    (files, skipped)
}

/// Process a directory into its own document log.
pub fn process_dir(config: &Config, args: &BatchArgs) -> Result<BatchOutcome> {
    let mut config = config.clone();
    if args.annotations_dir.is_some() {
        config.annotations_dir = args.annotations_dir.clone();
    }

    let log = Arc::new(InMemoryDocumentLog::new());
    let (files, mut skipped) = collect_files(&args.dir, config.recursive);
    info!("Processing {} files from {}", files.len(), args.dir.display());

    for path in files {
        let text = match read_plain_text(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                skipped.push(path);
                continue;
            }
        };

        let annotations = config
            .annotation_path_for(&path)
            .filter(|candidate| candidate.is_file());
        let backend = backend_for(annotations.as_deref())?;

        let processor = DocumentProcessor::with_log(backend, log.clone())
            .with_max_sentences(config.max_summary_sentences);
        processor.process(&text, &source_id(&path));
    }

    Ok(BatchOutcome {
        stats: log.stats(),
        skipped,
    })
}

pub fn run(config: &Config, args: &BatchArgs) -> Result<()> {
    let outcome = process_dir(config, args)?;
    if !outcome.skipped.is_empty() {
        warn!("Skipped {} files", outcome.skipped.len());
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
