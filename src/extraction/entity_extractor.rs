use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::annotation::EntitySpan;

/// Confidence assigned to annotator entities (the annotator gives none).
pub const ANNOTATED_CONFIDENCE: f64 = 0.8;
/// Confidence assigned to capitalized-word guesses.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;
/// Maximum number of fallback entities per document.
pub const FALLBACK_ENTITY_LIMIT: usize = 50;

pub const UNKNOWN_TYPE: &str = "UNKNOWN";
const FALLBACK_DESCRIPTION: &str = "Potential entity (capitalized word)";

/// Named entity found in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface form
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Human-readable meaning of `entity_type`, if known
    pub description: Option<String>,
    pub start_char: usize,
    pub end_char: usize,
    pub confidence: f64,
}

impl Entity {
    fn key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.entity_type.clone())
    }
}

/// Description for an OntoNotes entity label.
pub fn explain_label(label: &str) -> Option<&'static str> {
    let description = match label {
        "PERSON" => "People, including fictional",
        "NORP" => "Nationalities or religious or political groups",
        "FAC" => "Buildings, airports, highways, bridges, etc.",
        "ORG" => "Companies, agencies, institutions, etc.",
        "GPE" => "Countries, cities, states",
        "LOC" => "Non-GPE locations, mountain ranges, bodies of water",
        "PRODUCT" => "Objects, vehicles, foods, etc. (not services)",
        "EVENT" => "Named hurricanes, battles, wars, sports events, etc.",
        "WORK_OF_ART" => "Titles of books, songs, etc.",
        "LAW" => "Named documents made into laws.",
        "LANGUAGE" => "Any named language",
        "DATE" => "Absolute or relative dates or periods",
        "TIME" => "Times smaller than a day",
        "PERCENT" => "Percentage, including \"%\"",
        "MONEY" => "Monetary values, including unit",
        "QUANTITY" => "Measurements, as of weight or distance",
        "ORDINAL" => "\"first\", \"second\", etc.",
        "CARDINAL" => "Numerals that do not fall under another type",
        _ => return None,
    };
    Some(description)
}

/// Keep the first entity of every `(lowercase(name), type)` pair, in order.
fn dedup(entities: Vec<Entity>) -> Vec<Entity> {
    let mut seen = HashSet::new();
    entities
        .into_iter()
        .filter(|entity| seen.insert(entity.key()))
        .collect()
}

/// Build entities from annotator spans.
pub fn extract_entities(spans: &[EntitySpan]) -> Vec<Entity> {
    let entities = spans
        .iter()
        .map(|span| Entity {
            name: span.text.clone(),
            entity_type: span.label.clone(),
            description: explain_label(&span.label).map(str::to_string),
            start_char: span.start_char,
            end_char: span.end_char,
            confidence: ANNOTATED_CONFIDENCE,
        })
        .collect();

    dedup(entities)
}

/// Capitalized-word heuristic used when no annotator is available.
///
/// Every whitespace-delimited token that starts with an uppercase letter and
/// is longer than two characters becomes an `UNKNOWN` entity. Offsets are
/// character offsets into `text`.
pub fn extract_entities_fallback(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();

    for (start_char, word) in words_with_char_offsets(text) {
        let mut chars = word.chars();
        let starts_upper = chars.next().map(|c| c.is_uppercase()).unwrap_or(false);
        let char_len = word.chars().count();
        if !starts_upper || char_len <= 2 {
            continue;
        }

        entities.push(Entity {
            name: word.to_string(),
            entity_type: UNKNOWN_TYPE.to_string(),
            description: Some(FALLBACK_DESCRIPTION.to_string()),
            start_char,
            end_char: start_char + char_len,
            confidence: FALLBACK_CONFIDENCE,
        });
    }

    let mut entities = dedup(entities);
    entities.truncate(FALLBACK_ENTITY_LIMIT);
    entities
}

/// Whitespace-delimited words with the char offset of their first character.
fn words_with_char_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut word_start: Option<(usize, usize)> = None;

    for (char_idx, (byte_idx, c)) in text.char_indices().enumerate() {
        if c.is_whitespace() {
            if let Some((start_char, start_byte)) = word_start.take() {
                words.push((start_char, &text[start_byte..byte_idx]));
            }
        } else if word_start.is_none() {
            word_start = Some((char_idx, byte_idx));
        }
    }
    if let Some((start_char, start_byte)) = word_start {
        words.push((start_char, &text[start_byte..]));
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::annotation::fixtures::hiring_document;

    fn span(text: &str, label: &str, start: usize) -> EntitySpan {
        EntitySpan {
            text: text.to_string(),
            label: label.to_string(),
            start,
            end: start + 1,
            start_char: start * 10,
            end_char: start * 10 + text.len(),
        }
    }

    #[test]
    fn annotated_entities_get_fixed_confidence_and_description() {
        let doc = hiring_document();
        let entities = extract_entities(&doc.entities);

        assert_eq!(entities.len(), 3);
        assert!(entities.iter().all(|e| e.confidence == ANNOTATED_CONFIDENCE));
        assert_eq!(
            entities[2].description.as_deref(),
            Some("Companies, agencies, institutions, etc.")
        );
        assert_eq!((entities[1].start_char, entities[1].end_char), (12, 15));
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let spans = vec![
            span("Paris", "GPE", 0),
            span("Berlin", "GPE", 1),
            span("PARIS", "GPE", 2),
            span("Paris", "PERSON", 3),
        ];
        let entities = extract_entities(&spans);

        let names: Vec<_> = entities
            .iter()
            .map(|e| (e.name.as_str(), e.entity_type.as_str()))
            .collect();
        assert_eq!(names, vec![("Paris", "GPE"), ("Berlin", "GPE"), ("Paris", "PERSON")]);
        assert_eq!(entities[0].start_char, 0);
    }

    #[test]
    fn unknown_label_has_no_description() {
        let entities = extract_entities(&[span("Thing", "CUSTOM", 0)]);
        assert!(entities[0].description.is_none());
    }

    #[test]
    fn fallback_picks_capitalized_words() {
        let entities = extract_entities_fallback("Alice met Bob in Paris. Al is short, Über counts.");
        let names: Vec<_> = entities.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["Alice", "Bob", "Paris.", "Über"]);
        assert!(entities.iter().all(|e| e.entity_type == UNKNOWN_TYPE));
        assert!(entities.iter().all(|e| e.confidence == FALLBACK_CONFIDENCE));
    }

    #[test]
    fn fallback_offsets_are_char_offsets() {
        let entities = extract_entities_fallback("été Über");
        assert_eq!(entities[0].name, "Über");
        assert_eq!((entities[0].start_char, entities[0].end_char), (4, 8));
    }

    #[test]
    fn fallback_dedups_and_caps() {
        let text = (0..80)
            .map(|i| format!("Word{} Word{}", i, i))
            .collect::<Vec<_>>()
            .join(" ");
        let entities = extract_entities_fallback(&text);

        assert_eq!(entities.len(), FALLBACK_ENTITY_LIMIT);
        assert_eq!(entities[0].name, "Word0");
        assert_eq!(entities[49].name, "Word49");
    }

    #[test]
    fn fallback_is_deterministic() {
        let text = "Rust and Python and Rust again with Tokio";
        assert_eq!(extract_entities_fallback(text), extract_entities_fallback(text));
    }

    #[test]
    fn fallback_empty_text() {
        assert!(extract_entities_fallback("").is_empty());
        assert!(extract_entities_fallback("   \n\t").is_empty());
    }
}
