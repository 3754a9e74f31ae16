//! Symptom extraction: maps free-text patient turns onto a fixed vocabulary.
//!
//! Matching is a case-insensitive substring search. Tokens are emitted in the
//! order they first appear (turn by turn, then left to right within a turn).

use crate::models::SymptomSet;

#[derive(Debug, Clone)]
pub struct SymptomExtractor {
    /// Lower-cased, trimmed, non-empty phrases.
    vocabulary: Vec<String>,
}

impl SymptomExtractor {
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<String> = Vec::new();
        for phrase in vocabulary {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if !phrase.is_empty() && !phrases.contains(&phrase) {
                phrases.push(phrase);
            }
        }
        Self { vocabulary: phrases }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Symptoms mentioned in a single turn, in order of position.
    pub fn extract_turn(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut hits: Vec<(usize, &String)> = self
            .vocabulary
            .iter()
            .filter_map(|phrase| lower.find(phrase.as_str()).map(|pos| (pos, phrase)))
            .collect();
        // Same start position: longer phrase first ("chest pain" before "chest").
        hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));
        hits.into_iter().map(|(_, phrase)| phrase.clone()).collect()
    }

    /// Fold newly extracted tokens into an existing set without disturbing prior entries.
    pub fn accumulate(&self, set: &mut SymptomSet, text: &str) {
        set.extend(self.extract_turn(text));
    }

    /// Extract the full symptom set from an ordered sequence of patient turns.
    pub fn extract<I, S>(&self, turns: I) -> SymptomSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = SymptomSet::new();
        for turn in turns {
            self.accumulate(&mut set, turn.as_ref());
        }
        set
    }
}
