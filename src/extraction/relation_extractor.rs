use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::annotation::{AnnotatedDocument, EntitySpan, TokenRange};
use crate::Result;

/// Confidence assigned to every dependency-derived relation.
pub const RELATION_CONFIDENCE: f64 = 0.7;

/// Dependency labels that link an argument to its governing head.
pub const RELATION_DEPS: [&str; 3] = ["nsubj", "dobj", "pobj"];

/// Directed relation between two entities of the same document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub source: String,
    pub target: String,
    /// Dependency label of the source token
    #[serde(rename = "type")]
    pub relation_type: String,
    pub description: String,
    pub confidence: f64,
}

/// First spelling of every `(lowercase(text), label)` pair, matching the
/// names kept by entity deduplication.
fn canonical_names(entities: &[EntitySpan]) -> HashMap<(String, String), String> {
    let mut names = HashMap::new();
    for span in entities {
        names
            .entry(entity_key(span))
            .or_insert_with(|| span.text.clone());
    }
    names
}

fn entity_key(span: &EntitySpan) -> (String, String) {
    (span.text.to_lowercase(), span.label.clone())
}

/// Infer relations from dependency edges whose both ends fall inside entities.
///
/// For each sentence, every `nsubj`/`dobj`/`pobj` token is mapped to its
/// enclosing entity span and so is its head. A relation is emitted only when
/// both map to spans naming different entities. Endpoints are named with the
/// first spelling of their entity, as in the deduplicated entity list.
pub fn extract_relations(doc: &AnnotatedDocument) -> Result<Vec<Relation>> {
    doc.validate()?;
    let names = canonical_names(&doc.entities);
    let name_of = |span: &EntitySpan| -> String {
        names
            .get(&entity_key(span))
            .cloned()
            .unwrap_or_else(|| span.text.clone())
    };

    let sentences: Vec<TokenRange> = if doc.sentences.is_empty() {
        vec![TokenRange::new(0, doc.tokens.len())]
    } else {
        doc.sentences.clone()
    };

    let mut relations = Vec::new();

    for sentence in sentences {
        for index in sentence.start..sentence.end {
            let token = &doc.tokens[index];
            if !RELATION_DEPS.contains(&token.dep.as_str()) {
                continue;
            }

            let Some(source) = doc.entity_for_token(index) else {
                continue;
            };
            let Some(target) = doc.entity_for_token(token.head) else {
                continue;
            };

            if source.tokens() == target.tokens()
                || source.text.to_lowercase() == target.text.to_lowercase()
            {
                continue;
            }

            let (source, target) = (name_of(source), name_of(target));
            relations.push(Relation {
                description: format!("{} {} {}", source, token.dep, target),
                source,
                target,
                relation_type: token.dep.clone(),
                confidence: RELATION_CONFIDENCE,
            });
        }
    }

    debug!("Extracted {} relations", relations.len());
    Ok(relations)
}
