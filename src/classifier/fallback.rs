use crate::models::{ClassificationResult, ClassificationSource, RiskLevel, SymptomSet};

const EMERGENCY_SCORE: f64 = 0.95;
const EMERGENCY_CONFIDENCE: f64 = 0.85;
const DEFAULT_SCORE: f64 = 0.45;
const DEFAULT_CONFIDENCE: f64 = 0.70;
const MAX_DEFAULT_FINDINGS: usize = 3;

/// Rule-based stand-in for the remote scorer.
///
/// Pure and synchronous: no I/O, no clock, no randomness. The same symptom set
/// always yields the same result.
#[derive(Debug, Clone)]
pub struct FallbackClassifier {
    emergency_keywords: Vec<String>,
}

impl FallbackClassifier {
    pub fn new<I, S>(emergency_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emergency_keywords = emergency_keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { emergency_keywords }
    }

    /// Emergency keywords found in the symptom set, in symptom order.
    pub fn emergency_matches<'a>(&self, symptoms: &'a SymptomSet) -> Vec<&'a str> {
        symptoms
            .iter()
            .filter(|symptom| {
                let lower = symptom.to_lowercase();
                self.emergency_keywords.iter().any(|k| lower.contains(k.as_str()))
            })
            .collect()
    }

    pub fn classify(&self, symptoms: &SymptomSet) -> ClassificationResult {
        if !self.emergency_matches(symptoms).is_empty() {
            return ClassificationResult {
                urgency_score: EMERGENCY_SCORE,
                risk_level: RiskLevel::Critical,
                recommended_specialty: "Emergency Medicine".into(),
                confidence: EMERGENCY_CONFIDENCE,
                key_findings: vec![
                    "Emergency symptoms detected".into(),
                    "Immediate medical attention required".into(),
                ],
                source: ClassificationSource::Fallback,
            };
        }

        ClassificationResult {
            urgency_score: DEFAULT_SCORE,
            risk_level: RiskLevel::Medium,
            recommended_specialty: "General Practice".into(),
            confidence: DEFAULT_CONFIDENCE,
            key_findings: symptoms
                .iter()
                .take(MAX_DEFAULT_FINDINGS)
                .map(str::to_string)
                .collect(),
            source: ClassificationSource::Fallback,
        }
    }
}
