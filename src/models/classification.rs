use serde::Serialize;

use super::enums::{ClassificationSource, RiskLevel};

/// Output of one triage classification, whether scored remotely or by the rule fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Urgency in [0, 1].
    pub urgency_score: f64,
    pub risk_level: RiskLevel,
    pub recommended_specialty: String,
    /// Model confidence in [0, 1].
    pub confidence: f64,
    pub key_findings: Vec<String>,
    /// Which path produced this result. Only the urgency mapper looks at it.
    #[serde(skip)]
    pub(crate) source: ClassificationSource,
}

impl ClassificationResult {
    pub(crate) fn is_fallback(&self) -> bool {
        self.source == ClassificationSource::Fallback
    }
}
