//! Engine host: configuration, classifier, provider directory and live sessions.
//!
//! The classifier and directory are built once and shared by every session.
//! The directory is read-only after construction, so it is handed around as
//! `Arc<[Provider]>` without a lock.

use std::sync::Arc;

use crate::booking::BookingCoordinator;
use crate::classifier::{PatientContext, RemoteScorer, UrgencyClassifier};
use crate::config::{self, TriageConfig};
use crate::error::TriageError;
use crate::models::{Appointment, AppointmentType, Provider, SymptomSet, TriageResult};
use crate::recommend;
use crate::session::TriageSession;
use crate::sessions::SessionRegistry;

pub struct TriageEngine {
    config: TriageConfig,
    classifier: Arc<UrgencyClassifier>,
    directory: Arc<[Provider]>,
    booking: BookingCoordinator,
    sessions: SessionRegistry,
}

impl TriageEngine {
    /// Validate the configuration and build the classifier it describes.
    pub fn new(config: TriageConfig, directory: Vec<Provider>) -> Result<Self, TriageError> {
        config.validate()?;
        let classifier = UrgencyClassifier::from_config(&config)
            .map_err(|e| TriageError::ClassifierSetup(e.to_string()))?;
        Ok(Self::assemble(config, classifier, directory))
    }

    /// Like [`new`](Self::new) but scoring through the given scorer instead of HTTP.
    pub fn with_scorer(
        config: TriageConfig,
        directory: Vec<Provider>,
        scorer: Arc<dyn RemoteScorer>,
    ) -> Result<Self, TriageError> {
        config.validate()?;
        let classifier = UrgencyClassifier::with_scorer(&config, scorer);
        Ok(Self::assemble(config, classifier, directory))
    }

    fn assemble(config: TriageConfig, classifier: UrgencyClassifier, directory: Vec<Provider>) -> Self {
        tracing::info!(
            app = config::APP_NAME,
            version = config::APP_VERSION,
            providers = directory.len(),
            remote_classifier = classifier.has_remote(),
            "Triage engine ready"
        );
        Self {
            booking: BookingCoordinator::from_config(&config),
            classifier: Arc::new(classifier),
            directory: directory.into(),
            sessions: SessionRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn directory(&self) -> Arc<[Provider]> {
        Arc::clone(&self.directory)
    }

    pub fn start_session(&self, patient: PatientContext) -> Result<Arc<TriageSession>, TriageError> {
        let session = Arc::new(TriageSession::new(
            &self.config,
            Arc::clone(&self.classifier),
            patient,
        ));
        self.sessions.insert(Arc::clone(&session))?;
        tracing::info!(session_id = %session.id(), "Session started");
        Ok(session)
    }

    pub fn session(&self, id: &uuid::Uuid) -> Result<Arc<TriageSession>, TriageError> {
        self.sessions.get(id)
    }

    pub fn end_session(&self, id: &uuid::Uuid) -> Result<(), TriageError> {
        self.sessions.remove(id)?;
        tracing::info!(session_id = %id, "Session ended");
        Ok(())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Ranked providers from the shared directory for a triage outcome.
    pub fn recommend_for(&self, triage: &TriageResult) -> Vec<Provider> {
        recommend::recommend(triage, &self.directory)
    }

    pub fn provider(&self, provider_id: &str) -> Result<&Provider, TriageError> {
        self.directory
            .iter()
            .find(|p| p.id == provider_id)
            .ok_or_else(|| TriageError::ProviderNotFound(provider_id.to_string()))
    }

    /// Book a directory provider. Tele-Consult providers get a tele-consult appointment.
    pub fn book(
        &self,
        provider_id: &str,
        slot: &str,
        symptoms: &SymptomSet,
    ) -> Result<Appointment, TriageError> {
        let provider = self.provider(provider_id)?;
        self.booking
            .book(provider, slot, symptoms, AppointmentType::for_provider(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MockScorer;
    use crate::conversation::ConversationState;
    use crate::models::{AppointmentStatus, SuggestedAction};

    fn provider(id: &str, specialty: &str, distance: &str, slots: &[&str]) -> Provider {
        Provider {
            id: id.into(),
            name: format!("Provider {id}"),
            specialty: specialty.into(),
            rating: 4.6,
            distance_label: distance.into(),
            available_slots: slots.iter().map(|s| s.to_string()).collect(),
            accepts_insurance: true,
            address: Some("100 Main St".into()),
            phone: None,
        }
    }

    fn directory() -> Vec<Provider> {
        vec![
            provider("1", "General Practice", "0.8 mi", &["Today 2:00 PM"]),
            provider("2", "Urgent Care", "1.2 mi", &["Walk-in Available"]),
            provider("3", "Internal Medicine", "2.1 mi", &["Tomorrow 10:00 AM"]),
            provider("4", "Tele-Consult", "Virtual", &["Available Now"]),
            provider("5", "Emergency Medicine", "3.5 mi", &["24/7"]),
        ]
    }

    fn engine() -> TriageEngine {
        TriageEngine::with_scorer(TriageConfig::default(), directory(), Arc::new(MockScorer::rules()))
            .unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TriageConfig {
            classifier_timeout_ms: 0,
            ..TriageConfig::default()
        };
        assert!(matches!(
            TriageEngine::new(config, directory()),
            Err(TriageError::Config(_))
        ));
    }

    #[test]
    fn session_lifecycle() {
        let engine = engine();
        let session = engine.start_session(PatientContext::default()).unwrap();
        let id = session.id();
        assert_eq!(engine.session_count(), 1);
        assert_eq!(engine.session(&id).unwrap().id(), id);

        engine.end_session(&id).unwrap();
        assert_eq!(engine.session_count(), 0);
        assert!(matches!(engine.session(&id), Err(TriageError::SessionNotFound(_))));
        assert!(engine.end_session(&id).is_err());
    }

    #[tokio::test]
    async fn triage_recommend_and_book() {
        let engine = engine();
        let session = engine.start_session(PatientContext::default()).unwrap();
        session.greet().unwrap();
        for text in ["I have a fever", "since yesterday", "maybe a 5", "a little cough"] {
            session.send(text).await.unwrap();
        }
        assert_eq!(session.state().unwrap(), ConversationState::Resolved);

        let triage = session.current().unwrap().unwrap();
        assert_eq!(triage.suggested_action(), SuggestedAction::Clinic);

        let ranked = engine.recommend_for(&triage);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].id, "1");
        assert_eq!(ranked[4].id, "4");

        let appointment = engine
            .book("3", "Tomorrow 10:00 AM", &triage.primary_symptoms)
            .unwrap();
        assert_eq!(appointment.provider_name, "Provider 3");
        assert_eq!(appointment.time, "10:00 AM");
        assert_eq!(appointment.appointment_type, AppointmentType::InPerson);
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert!(appointment.symptoms.contains("fever"));
    }

    #[test]
    fn tele_consult_booking_type() {
        let engine = engine();
        let appointment = engine
            .book("4", "Available Now", &SymptomSet::new())
            .unwrap();
        assert_eq!(appointment.appointment_type, AppointmentType::TeleConsult);
        assert_eq!(appointment.date, None);
        assert_eq!(appointment.time, "Available Now");
    }

    #[test]
    fn booking_errors() {
        let engine = engine();
        assert!(matches!(
            engine.book("1", "Today 9:00 AM", &SymptomSet::new()),
            Err(TriageError::InvalidSlot { .. })
        ));
        assert!(matches!(
            engine.book("99", "Today 2:00 PM", &SymptomSet::new()),
            Err(TriageError::ProviderNotFound(id)) if id == "99"
        ));
    }

    #[test]
    fn directory_is_shared() {
        let engine = engine();
        let a = engine.directory();
        let b = engine.directory();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), 5);
    }
}
