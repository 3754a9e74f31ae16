use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::types::{RemoteScorer, ScoreRequest, ScoreResponse};
use super::ClassifierError;

enum Behavior {
    /// Keyword rules standing in for the hosted model during development.
    Rules,
    Fixed(ScoreResponse),
    Fail(ClassifierError),
}

/// Offline scorer for development and tests, with optional simulated latency.
pub struct MockScorer {
    behavior: Behavior,
    latency: Duration,
    calls: AtomicUsize,
}

impl MockScorer {
    /// Development rules: chest pain → cardiology emergency, fever → internal
    /// medicine, anything else → routine general practice.
    pub fn rules() -> Self {
        Self::with_behavior(Behavior::Rules)
    }

    /// Always return the given payload (validated later, like a real response).
    pub fn fixed(response: ScoreResponse) -> Self {
        Self::with_behavior(Behavior::Fixed(response))
    }

    pub fn failing(error: ClassifierError) -> Self {
        Self::with_behavior(Behavior::Fail(error))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of score requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }
}

fn rules_response(symptoms: &[String]) -> ScoreResponse {
    let mentions = |needle: &str| symptoms.iter().any(|s| s.to_lowercase().contains(needle));

    if mentions("chest pain") {
        return ScoreResponse {
            urgency_score: 0.92,
            risk_level: "critical".into(),
            recommended_specialty: "Cardiology".into(),
            confidence: 0.94,
            key_findings: vec![
                "Chest pain detected - potential cardiac event".into(),
                "Immediate evaluation recommended".into(),
                "Consider ECG and cardiac biomarkers".into(),
            ],
        };
    }

    if mentions("fever") {
        return ScoreResponse {
            urgency_score: 0.58,
            risk_level: "medium".into(),
            recommended_specialty: "Internal Medicine".into(),
            confidence: 0.82,
            key_findings: vec![
                "Fever pattern suggests possible infection".into(),
                "Monitor temperature trends".into(),
                "Consider basic lab work".into(),
            ],
        };
    }

    ScoreResponse {
        urgency_score: 0.35,
        risk_level: "low".into(),
        recommended_specialty: "General Practice".into(),
        confidence: 0.76,
        key_findings: vec![
            "Symptoms appear non-urgent".into(),
            "Routine consultation recommended".into(),
            "Self-care measures may be appropriate".into(),
        ],
    }
}

#[async_trait]
impl RemoteScorer for MockScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.behavior {
            Behavior::Rules => Ok(rules_response(&request.symptoms)),
            Behavior::Fixed(response) => Ok(response.clone()),
            Behavior::Fail(error) => Err(error.clone()),
        }
    }
}
