use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::annotation::AnnotatedDocument;

/// Maximum keywords returned with an annotator.
pub const KEYWORD_LIMIT: usize = 50;
/// Maximum keywords returned by the lexical fallback.
pub const FALLBACK_KEYWORD_LIMIT: usize = 20;

pub const NOUN_PHRASE: &str = "noun_phrase";
pub const WORD: &str = "WORD";

const KEYWORD_POS: [&str; 3] = ["NOUN", "PROPN", "ADJ"];
const MAX_PHRASE_WORDS: usize = 3;

/// Ranked keyword. `importance` is not normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    /// `noun_phrase`, a part-of-speech tag, or `WORD`
    #[serde(rename = "type")]
    pub category: String,
    pub importance: f64,
}

/// Lowercased text with the counts every candidate is scored against.
struct ScoringText {
    lower: String,
    word_count: usize,
    char_len: usize,
}

impl ScoringText {
    fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let word_count = lower.split_whitespace().count();
        let char_len = lower.chars().count();
        Self {
            lower,
            word_count,
            char_len,
        }
    }

    fn importance(&self, keyword: &str) -> f64 {
        let keyword_lower = keyword.to_lowercase();
        if keyword_lower.is_empty() {
            return 0.0;
        }

        let tf = if self.word_count == 0 {
            0.0
        } else {
            self.lower.matches(keyword_lower.as_str()).count() as f64 / self.word_count as f64
        };

        let length_bonus = keyword.split_whitespace().count().min(MAX_PHRASE_WORDS) as f64 * 0.1;

        let position_bonus = match self.lower.find(keyword_lower.as_str()) {
            Some(byte_idx) => {
                let char_idx = self.lower[..byte_idx].chars().count();
                if (char_idx as f64) < self.char_len as f64 * 0.2 {
                    0.1
                } else {
                    0.0
                }
            }
            None => 0.0,
        };

        tf + length_bonus + position_bonus
    }
}

/// `term_frequency + length_bonus + position_bonus` for `keyword` in `text`.
///
/// Term frequency counts case-insensitive, non-overlapping occurrences against
/// the whitespace word count. Up to three words earn 0.1 each, and a first
/// occurrence within the leading 20% of the text earns another 0.1.
pub fn keyword_importance(keyword: &str, text: &str) -> f64 {
    ScoringText::new(text).importance(keyword)
}

/// Score noun chunks and content words from an annotated document.
pub fn extract_keywords(doc: &AnnotatedDocument) -> Vec<Keyword> {
    let scoring = ScoringText::new(&doc.text);
    let mut keywords = Vec::new();

    for chunk in &doc.noun_chunks {
        if chunk.text.split_whitespace().count() <= MAX_PHRASE_WORDS {
            keywords.push(Keyword {
                text: chunk.text.clone(),
                category: NOUN_PHRASE.to_string(),
                importance: scoring.importance(&chunk.text),
            });
        }
    }

    for token in &doc.tokens {
        if KEYWORD_POS.contains(&token.pos.as_str())
            && !token.is_stop
            && !token.is_punct
            && token.text.chars().count() > 2
        {
            keywords.push(Keyword {
                text: token.text.clone(),
                category: token.pos.clone(),
                importance: scoring.importance(&token.text),
            });
        }
    }

    rank_unique(keywords, KEYWORD_LIMIT)
}

/// Stable sort by importance, keep the first of each lowercased text.
fn rank_unique(mut keywords: Vec<Keyword>, limit: usize) -> Vec<Keyword> {
    keywords.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter(|k| seen.insert(k.text.to_lowercase()))
        .take(limit)
        .collect()
}

/// Most frequent alphabetic words longer than three characters.
///
/// Ties keep first-seen order so repeated runs give identical output.
pub fn extract_keywords_fallback(text: &str) -> Vec<Keyword> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<String> = Vec::new();
    let mut freq: HashMap<String, usize> = HashMap::new();

    for word in &words {
        let lower = word.to_lowercase();
        if lower.chars().count() > 3 && lower.chars().all(char::is_alphabetic) {
            let count = freq.entry(lower.clone()).or_insert(0);
            if *count == 0 {
                order.push(lower);
            }
            *count += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|w| {
            let count = freq.get(&w).copied().unwrap_or(0);
            (w, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(FALLBACK_KEYWORD_LIMIT);

    let total = words.len() as f64;
    ranked
        .into_iter()
        .map(|(text, count)| Keyword {
            text,
            category: WORD.to_string(),
            importance: count as f64 / total,
        })
        .collect()
}
