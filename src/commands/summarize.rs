//! `summarize` command: print the extractive summary of a file.

use std::path::Path;

use anyhow::{Context, Result};

use super::process::read_plain_text;
use crate::extraction::summarize;

pub fn run(path: &Path, max_sentences: usize) -> Result<()> {
    let text =
        read_plain_text(path).with_context(|| format!("failed to read {}", path.display()))?;
    let summary = summarize(&text, max_sentences);

    for sentence in summary.sentences() {
        println!("- {}", sentence);
    }
    Ok(())
}
