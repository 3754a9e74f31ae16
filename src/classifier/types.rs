use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ClassifierError;
use crate::models::{ClassificationResult, ClassificationSource, RiskLevel, SymptomSet};

/// Optional patient details forwarded to the remote scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medical_history: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current_medications: Vec<String>,
}

/// Request body sent to the scoring endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRequest {
    pub symptoms: Vec<String>,
    pub patient_data: PatientContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ScoreRequest {
    pub fn new(symptoms: &SymptomSet, patient: &PatientContext, endpoint: Option<&str>) -> Self {
        Self {
            symptoms: symptoms.as_slice().to_vec(),
            patient_data: patient.clone(),
            endpoint: endpoint.map(|e| e.to_string()),
        }
    }
}

/// Raw response body from the scoring endpoint, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub urgency_score: f64,
    pub risk_level: String,
    pub recommended_specialty: String,
    pub confidence: f64,
    pub key_findings: Vec<String>,
}

impl ScoreResponse {
    /// Check the payload against the classification schema.
    ///
    /// Any out-of-range number, unknown risk level or blank specialty rejects the
    /// whole response; nothing is salvaged from a partially valid payload.
    pub fn validate(self) -> Result<ClassificationResult, ClassifierError> {
        check_unit_interval("urgency_score", self.urgency_score)?;
        check_unit_interval("confidence", self.confidence)?;

        let risk_level = RiskLevel::from_str(self.risk_level.trim())
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        let specialty = self.recommended_specialty.trim();
        if specialty.is_empty() {
            return Err(ClassifierError::InvalidResponse(
                "recommended_specialty is empty".into(),
            ));
        }

        Ok(ClassificationResult {
            urgency_score: self.urgency_score,
            risk_level,
            recommended_specialty: specialty.to_string(),
            confidence: self.confidence,
            key_findings: self.key_findings,
            source: ClassificationSource::Primary,
        })
    }
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ClassifierError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ClassifierError::InvalidResponse(format!(
            "{field} out of range: {value}"
        )))
    }
}

/// Tagged result of one remote scoring attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Success(ClassificationResult),
    Failure(ClassifierError),
}

/// Remote urgency scoring capability (allows mocking).
#[async_trait]
pub trait RemoteScorer: Send + Sync {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, ClassifierError>;
}
