//! Linguistic annotation consumed by the pipeline.
//!
//! Tagging and parsing are not done here. An external tagger produces an
//! [`AnnotatedDocument`] (tokens, part-of-speech tags, dependency edges,
//! sentence boundaries, named-entity spans and noun chunks) and hands it to
//! the pipeline through the [`Annotator`] trait.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Error, Result};

/// Single token with its tags. Index = position in [`AnnotatedDocument::tokens`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
    /// Coarse part-of-speech tag (`NOUN`, `PROPN`, `ADJ`, ...)
    pub pos: String,
    /// Dependency label relative to `head` (`nsubj`, `dobj`, `pobj`, ...)
    pub dep: String,
    /// Index of the syntactic head; a root token points at itself
    pub head: usize,
    #[serde(default)]
    pub is_stop: bool,
    #[serde(default)]
    pub is_punct: bool,
}

/// Half-open token range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// Contiguous run of tokens recognized as a named entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub start_char: usize,
    pub end_char: usize,
}

impl EntitySpan {
    pub fn tokens(&self) -> TokenRange {
        TokenRange::new(self.start, self.end)
    }
}

/// Base noun phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NounChunk {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Full annotation of one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<AnnotatedToken>,
    #[serde(default)]
    pub sentences: Vec<TokenRange>,
    #[serde(default)]
    pub entities: Vec<EntitySpan>,
    #[serde(default)]
    pub noun_chunks: Vec<NounChunk>,
}

impl AnnotatedDocument {
    /// Parse an annotation from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check that every index points inside the token list.
    pub fn validate(&self) -> Result<()> {
        let len = self.tokens.len();

        for (i, token) in self.tokens.iter().enumerate() {
            if token.head >= len {
                return Err(Error::Annotation(format!(
                    "token {} has head {} outside {} tokens",
                    i, token.head, len
                )));
            }
        }

        let ranges = self
            .sentences
            .iter()
            .map(|s| ("sentence", s.start, s.end))
            .chain(self.entities.iter().map(|e| ("entity", e.start, e.end)))
            .chain(self.noun_chunks.iter().map(|c| ("noun chunk", c.start, c.end)));

        for (kind, start, end) in ranges {
            if start > end || end > len {
                return Err(Error::Annotation(format!(
                    "{} range {}..{} outside {} tokens",
                    kind, start, end, len
                )));
            }
        }

        Ok(())
    }

    /// First entity span whose token range contains `index`.
    pub fn entity_for_token(&self, index: usize) -> Option<&EntitySpan> {
        self.entities.iter().find(|e| e.tokens().contains(index))
    }
}

/// External capability that turns raw text into an [`AnnotatedDocument`].
pub trait Annotator {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument>;

    fn name(&self) -> &str;
}

/// Serves an annotation computed ahead of time by an external tagger.
#[derive(Debug, Clone)]
pub struct PrecomputedAnnotator {
    document: AnnotatedDocument,
}

impl PrecomputedAnnotator {
    pub fn new(document: AnnotatedDocument) -> Result<Self> {
        document.validate()?;
        Ok(Self { document })
    }

    /// Load the annotation JSON written next to a document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let document = AnnotatedDocument::from_json(&content)?;
        info!(
            "Loaded annotation from {} ({} tokens, {} entities)",
            path.as_ref().display(),
            document.tokens.len(),
            document.entities.len()
        );
        Ok(Self { document })
    }
}

impl Annotator for PrecomputedAnnotator {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument> {
        if self.document.text != text {
            return Err(Error::Annotation(
                "annotation was produced for a different text".to_string(),
            ));
        }
        Ok(self.document.clone())
    }

    fn name(&self) -> &str {
        "precomputed"
    }
}

/// Which extraction path a document goes through.
pub enum NlpBackend {
    /// Annotator present: full pipeline
    Annotated(Box<dyn Annotator + Send + Sync>),
    /// No annotator: lexical heuristics only
    Lexical,
}

impl NlpBackend {
    pub fn annotated<A: Annotator + Send + Sync + 'static>(annotator: A) -> Self {
        NlpBackend::Annotated(Box::new(annotator))
    }

    /// Annotate `text`, or `None` when the lexical path should be used.
    pub fn annotate(&self, text: &str) -> Option<AnnotatedDocument> {
        match self {
            NlpBackend::Annotated(annotator) => match annotator.annotate(text) {
                Ok(doc) => Some(doc),
                Err(err) => {
                    warn!(
                        "Annotator '{}' failed, using lexical fallback ({err})",
                        annotator.name()
                    );
                    None
                }
            },
            NlpBackend::Lexical => None,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            NlpBackend::Annotated(_) => "annotated",
            NlpBackend::Lexical => "lexical",
        }
    }
}

impl std::fmt::Debug for NlpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NlpBackend::Annotated(annotator) => {
                f.debug_tuple("Annotated").field(&annotator.name()).finish()
            }
            NlpBackend::Lexical => f.write_str("Lexical"),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn token(text: &str, start_char: usize, pos: &str, dep: &str, head: usize) -> AnnotatedToken {
        AnnotatedToken {
            text: text.to_string(),
            start_char,
            end_char: start_char + text.len(),
            pos: pos.to_string(),
            dep: dep.to_string(),
            head,
            is_stop: false,
            is_punct: pos == "PUNCT",
        }
    }

    /// "Alice hired Bob at Acme."
    pub fn hiring_document() -> AnnotatedDocument {
        let tokens = vec![
            token("Alice", 0, "PROPN", "nsubj", 1),
            token("hired", 6, "VERB", "ROOT", 1),
            token("Bob", 12, "PROPN", "dobj", 1),
            token("at", 16, "ADP", "prep", 1),
            token("Acme", 19, "PROPN", "pobj", 3),
            token(".", 23, "PUNCT", "punct", 1),
        ];
        AnnotatedDocument {
            text: "Alice hired Bob at Acme.".to_string(),
            tokens,
            sentences: vec![TokenRange::new(0, 6)],
            entities: vec![
                EntitySpan {
                    text: "Alice".to_string(),
                    label: "PERSON".to_string(),
                    start: 0,
                    end: 1,
                    start_char: 0,
                    end_char: 5,
                },
                EntitySpan {
                    text: "Bob".to_string(),
                    label: "PERSON".to_string(),
                    start: 2,
                    end: 3,
                    start_char: 12,
                    end_char: 15,
                },
                EntitySpan {
                    text: "Acme".to_string(),
                    label: "ORG".to_string(),
                    start: 4,
                    end: 5,
                    start_char: 19,
                    end_char: 23,
                },
            ],
            noun_chunks: vec![
                NounChunk {
                    text: "Alice".to_string(),
                    start: 0,
                    end: 1,
                },
                NounChunk {
                    text: "Bob".to_string(),
                    start: 2,
                    end: 3,
                },
                NounChunk {
                    text: "Acme".to_string(),
                    start: 4,
                    end: 5,
                },
            ],
        }
    }
}
