//! `process` command: extract knowledge from one plain-text file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::extraction::{is_plain_text, NlpBackend, PrecomputedAnnotator, ProcessingReport};
use crate::{Config, DocumentProcessor, Error};

/// Arguments of the `process` command.
#[derive(Debug, Clone)]
pub struct ProcessArgs {
    pub path: PathBuf,
    /// Annotation JSON produced by an external tagger for this file
    pub annotations: Option<PathBuf>,
    /// Source id recorded in the output (defaults to the file name)
    pub source: Option<String>,
    pub max_sentences: Option<usize>,
}

/// Read a file that is already plain text (`.txt`, `.md`).
pub fn read_plain_text(path: &Path) -> crate::Result<String> {
    let name = path.to_string_lossy();
    if !is_plain_text(&name) {
        return Err(Error::UnsupportedFormat(format!(
            "{} needs an external decoder before extraction",
            name
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Annotated backend when an annotation file is given, lexical otherwise.
pub fn backend_for(annotations: Option<&Path>) -> Result<NlpBackend> {
    match annotations {
        Some(path) => {
            let annotator = PrecomputedAnnotator::from_file(path)
                .with_context(|| format!("failed to load annotations from {}", path.display()))?;
            Ok(NlpBackend::annotated(annotator))
        }
        None => Ok(NlpBackend::Lexical),
    }
}

/// Source id for a path: its file name, or the whole path.
pub fn source_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Process one file and return the report.
pub fn process_file(config: &Config, args: &ProcessArgs) -> Result<ProcessingReport> {
    let text = read_plain_text(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let backend = backend_for(args.annotations.as_deref())?;

    let processor = DocumentProcessor::from_config(config, backend)
        .with_max_sentences(args.max_sentences.unwrap_or(config.max_summary_sentences));

    let source = args.source.clone().unwrap_or_else(|| source_id(&args.path));
    info!("Processing {} ({} mode)", source, processor.backend().mode());
    Ok(processor.process_with_info(&text, &source))
}

pub fn run(config: &Config, args: &ProcessArgs) -> Result<()> {
    let report = process_file(config, args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
