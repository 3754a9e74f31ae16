use serde::{Deserialize, Serialize};

/// Ordered, deduplicated symptom tokens gathered over one session.
///
/// Tokens can only be appended; existing entries are never reordered or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomSet(Vec<String>);

impl SymptomSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a token unless it is already present. Returns true if it was added.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.contains(&token) {
            return false;
        }
        self.0.push(token);
        true
    }

    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.insert(token);
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymptomSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_collapses_duplicates() {
        let mut set = SymptomSet::new();
        assert!(set.insert("headache"));
        assert!(set.insert("fever"));
        assert!(!set.insert("headache"));
        assert_eq!(set.as_slice(), &["headache".to_string(), "fever".to_string()]);
    }

    #[test]
    fn collect_preserves_first_occurrence_order() {
        let set: SymptomSet = ["cough", "fever", "cough", "nausea"].into_iter().collect();
        let tokens: Vec<&str> = set.iter().collect();
        assert_eq!(tokens, vec!["cough", "fever", "nausea"]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let set: SymptomSet = ["chest pain"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["chest pain"]"#);
    }
}
