use std::sync::Arc;
use std::time::Duration;

use super::fallback::FallbackClassifier;
use super::http::HttpScorer;
use super::types::{PatientContext, RemoteScorer, ScoreOutcome, ScoreRequest};
use super::ClassifierError;
use crate::config::TriageConfig;
use crate::models::{ClassificationResult, SymptomSet};

/// Remote scoring with a bounded wait, backed by the rule fallback.
pub struct UrgencyClassifier {
    scorer: Option<Arc<dyn RemoteScorer>>,
    fallback: FallbackClassifier,
    timeout: Duration,
    endpoint: Option<String>,
}

impl UrgencyClassifier {
    pub fn new(
        scorer: Option<Arc<dyn RemoteScorer>>,
        fallback: FallbackClassifier,
        timeout: Duration,
    ) -> Self {
        Self {
            scorer,
            fallback,
            timeout,
            endpoint: None,
        }
    }

    /// Build from configuration: an HTTP scorer when `classifier_url` is set,
    /// fallback-only otherwise.
    pub fn from_config(config: &TriageConfig) -> Result<Self, ClassifierError> {
        let scorer: Option<Arc<dyn RemoteScorer>> = match &config.classifier_url {
            Some(url) => Some(Arc::new(HttpScorer::new(url, config.classifier_timeout())?)),
            None => None,
        };
        let mut classifier = Self::new(
            scorer,
            FallbackClassifier::new(&config.emergency_keywords),
            config.classifier_timeout(),
        );
        classifier.endpoint = config.classifier_endpoint.clone();
        Ok(classifier)
    }

    /// Same as [`from_config`](Self::from_config) but with a caller-supplied scorer.
    pub fn with_scorer(config: &TriageConfig, scorer: Arc<dyn RemoteScorer>) -> Self {
        let mut classifier = Self::new(
            Some(scorer),
            FallbackClassifier::new(&config.emergency_keywords),
            config.classifier_timeout(),
        );
        classifier.endpoint = config.classifier_endpoint.clone();
        classifier
    }

    pub fn has_remote(&self) -> bool {
        self.scorer.is_some()
    }

    /// One remote attempt, bounded by the configured timeout and validated.
    pub async fn score_remote(
        &self,
        symptoms: &SymptomSet,
        patient: &PatientContext,
    ) -> ScoreOutcome {
        let Some(scorer) = &self.scorer else {
            return ScoreOutcome::Failure(ClassifierError::NotConfigured);
        };

        let request = ScoreRequest::new(symptoms, patient, self.endpoint.as_deref());
        let attempt = match tokio::time::timeout(self.timeout, scorer.score(&request)).await {
            Ok(result) => result,
            Err(_) => Err(ClassifierError::Timeout(self.timeout.as_millis() as u64)),
        };

        match attempt.and_then(|response| response.validate()) {
            Ok(result) => ScoreOutcome::Success(result),
            Err(e) => ScoreOutcome::Failure(e),
        }
    }

    /// Classify a symptom set. Never fails: any remote failure falls through to the rules.
    pub async fn classify(
        &self,
        symptoms: &SymptomSet,
        patient: &PatientContext,
    ) -> ClassificationResult {
        match self.score_remote(symptoms, patient).await {
            ScoreOutcome::Success(result) => {
                tracing::debug!(
                    score = result.urgency_score,
                    risk = %result.risk_level,
                    "Remote classification accepted"
                );
                result
            }
            ScoreOutcome::Failure(ClassifierError::NotConfigured) => {
                tracing::debug!("No remote classifier configured, using rule fallback");
                self.fallback.classify(symptoms)
            }
            ScoreOutcome::Failure(e) => {
                tracing::warn!(
                    error = %e,
                    symptom_count = symptoms.len(),
                    "Remote classification failed, using rule fallback"
                );
                self.fallback.classify(symptoms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{MockScorer, ScoreResponse};
    use crate::models::{ClassificationSource, RiskLevel};

    fn config() -> TriageConfig {
        TriageConfig {
            classifier_timeout_ms: 50,
            ..TriageConfig::default()
        }
    }

    fn symptoms(tokens: &[&str]) -> SymptomSet {
        tokens.iter().copied().collect()
    }

    #[tokio::test]
    async fn remote_result_is_used_when_valid() {
        let classifier = UrgencyClassifier::with_scorer(&config(), Arc::new(MockScorer::rules()));
        let result = classifier
            .classify(&symptoms(&["fever"]), &PatientContext::default())
            .await;
        assert_eq!(result.recommended_specialty, "Internal Medicine");
        assert_eq!(result.source, ClassificationSource::Primary);
    }

    #[tokio::test]
    async fn chest_pain_with_unavailable_classifier_is_critical() {
        let scorer = MockScorer::failing(ClassifierError::Connection("http://scorer".into()));
        let classifier = UrgencyClassifier::with_scorer(&config(), Arc::new(scorer));
        let result = classifier
            .classify(&symptoms(&["chest pain"]), &PatientContext::default())
            .await;
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.source, ClassificationSource::Fallback);
    }

    #[tokio::test]
    async fn slow_scorer_is_cut_off_by_timeout() {
        let scorer = MockScorer::rules().with_latency(Duration::from_secs(5));
        let classifier = UrgencyClassifier::with_scorer(&config(), Arc::new(scorer));
        let outcome = classifier
            .score_remote(&symptoms(&["headache"]), &PatientContext::default())
            .await;
        assert_eq!(outcome, ScoreOutcome::Failure(ClassifierError::Timeout(50)));
    }

    #[tokio::test]
    async fn invalid_payload_falls_back() {
        let scorer = MockScorer::fixed(ScoreResponse {
            urgency_score: 3.5,
            risk_level: "critical".into(),
            recommended_specialty: "Cardiology".into(),
            confidence: 0.9,
            key_findings: vec![],
        });
        let classifier = UrgencyClassifier::with_scorer(&config(), Arc::new(scorer));
        let result = classifier
            .classify(&symptoms(&["headache"]), &PatientContext::default())
            .await;
        assert_eq!(result.source, ClassificationSource::Fallback);
        assert_eq!(result.urgency_score, 0.45);
        assert_eq!(result.key_findings, vec!["headache".to_string()]);
    }

    #[tokio::test]
    async fn fallback_only_without_url() {
        let classifier = UrgencyClassifier::from_config(&TriageConfig::default()).unwrap();
        assert!(!classifier.has_remote());
        let outcome = classifier
            .score_remote(&symptoms(&["fever"]), &PatientContext::default())
            .await;
        assert_eq!(outcome, ScoreOutcome::Failure(ClassifierError::NotConfigured));
    }

    #[tokio::test]
    async fn from_config_builds_http_scorer() {
        let config = TriageConfig {
            classifier_url: Some("http://127.0.0.1:9/score".into()),
            ..config()
        };
        let classifier = UrgencyClassifier::from_config(&config).unwrap();
        assert!(classifier.has_remote());
    }
}
