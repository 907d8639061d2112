//! Extractive summarization.
//!
//! Sentences are scored by position and length, the best ones are kept and
//! emitted in document order.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::{Error, Result};

pub const DEFAULT_MAX_SENTENCES: usize = 3;
/// Sentences with a trimmed length at or below this are dropped.
pub const MIN_SENTENCE_CHARS: usize = 10;
/// Raw-text prefix used when no summary can be built.
pub const FALLBACK_CHARS: usize = 500;

const SENTENCE_SEPARATOR: &str = ". ";

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("invalid sentence boundary regex"));

/// Ordered sentences selected from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    sentences: Vec<String>,
}

impl Summary {
    pub fn new(sentences: Vec<String>) -> Self {
        Self { sentences }
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sentences joined with `". "`.
    pub fn text(&self) -> String {
        self.sentences.join(SENTENCE_SEPARATOR)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text())
    }
}

/// Split on runs of `.`, `!`, `?` and keep trimmed fragments longer than 10 chars.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

/// `0.6 * 1/(index+1) + 0.4 * min(words/20, 1)`.
pub fn sentence_score(index: usize, sentence: &str) -> f64 {
    let position_score = 1.0 / (index as f64 + 1.0);
    let length_score = (sentence.split_whitespace().count() as f64 / 20.0).min(1.0);
    position_score * 0.6 + length_score * 0.4
}

/// Summarize `text`, falling back to a truncated prefix of the raw text.
pub fn summarize(text: &str, max_sentences: usize) -> Summary {
    match try_summarize(text, max_sentences) {
        Ok(summary) => summary,
        Err(err) => {
            if !text.trim().is_empty() {
                warn!("Summary generation failed, using text prefix ({err})");
            }
            text_prefix(text)
        }
    }
}

/// Summarize without the fallback. A zero cap yields an empty summary.
pub fn try_summarize(text: &str, max_sentences: usize) -> Result<Summary> {
    if max_sentences == 0 {
        return Ok(Summary::default());
    }

    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Err(Error::InvalidInput(
            "text has no sentence long enough to summarize".to_string(),
        ));
    }

    if sentences.len() <= max_sentences {
        return Ok(Summary::new(sentences));
    }

    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| (i, sentence_score(i, s)))
        .collect();

    // Stable: equal scores keep the earlier sentence.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(max_sentences);
    scored.sort_by_key(|(i, _)| *i);

    let mut sentences: Vec<Option<String>> = sentences.into_iter().map(Some).collect();
    let selected = scored
        .into_iter()
        .filter_map(|(i, _)| sentences[i].take())
        .collect();

    Ok(Summary::new(selected))
}

/// First 500 characters of `text`, with `...` when cut.
pub fn text_prefix(text: &str) -> Summary {
    if text.is_empty() {
        return Summary::default();
    }

    let prefix = if text.chars().count() > FALLBACK_CHARS {
        let cut: String = text.chars().take(FALLBACK_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    };

    Summary::new(vec![prefix])
}
