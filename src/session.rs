//! One triage session: the conversation controller plus the async classification step.
//!
//! The controller sits behind a `std::sync::Mutex` that is only ever held for
//! synchronous bookkeeping, never across the classifier await. Correctness
//! under concurrent callers comes from the controller itself: a turn sent
//! while `Analyzing` is refused, and a result whose ticket predates a reset
//! is discarded.
//!
//! Classification runs on its own task, so a caller that gives up on `send`
//! (timeout, disconnect) does not leave the session stuck in `Analyzing`.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::classifier::{PatientContext, UrgencyClassifier};
use crate::config::TriageConfig;
use crate::conversation::{ClassificationTicket, ConversationController, ConversationState};
use crate::error::TriageError;
use crate::mapper::UrgencyMapper;
use crate::models::{ConversationTurn, SymptomSet, TriageResult};

/// Reply to one patient turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub reply: String,
    pub state: ConversationState,
    /// Set on the turn whose classification was accepted.
    pub triage: Option<TriageResult>,
}

pub struct TriageSession {
    id: Uuid,
    controller: Arc<Mutex<ConversationController>>,
    /// Accepted results, newest first. Survives `reset`.
    history: Arc<Mutex<Vec<TriageResult>>>,
    classifier: Arc<UrgencyClassifier>,
    mapper: UrgencyMapper,
    patient: PatientContext,
}

impl TriageSession {
    pub fn new(
        config: &TriageConfig,
        classifier: Arc<UrgencyClassifier>,
        patient: PatientContext,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            controller: Arc::new(Mutex::new(ConversationController::from_config(config))),
            history: Arc::new(Mutex::new(Vec::new())),
            classifier,
            mapper: UrgencyMapper::new(config.annotate_fallback),
            patient,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn patient(&self) -> &PatientContext {
        &self.patient
    }

    fn controller(&self) -> Result<MutexGuard<'_, ConversationController>, TriageError> {
        self.controller.lock().map_err(|_| TriageError::LockPoisoned)
    }

    fn history_mut(&self) -> Result<MutexGuard<'_, Vec<TriageResult>>, TriageError> {
        self.history.lock().map_err(|_| TriageError::LockPoisoned)
    }

    pub fn greet(&self) -> Result<String, TriageError> {
        self.controller()?.greet()
    }

    /// Record a patient turn. On the turn that completes collection this also
    /// classifies the accumulated symptoms and resolves the session.
    pub async fn send(&self, text: &str) -> Result<TurnReply, TriageError> {
        let outcome = {
            let mut controller = self.controller()?;
            controller.record_turn(text)?
        };

        let Some(ticket) = outcome.ticket else {
            return Ok(TurnReply {
                reply: outcome.reply,
                state: outcome.state,
                triage: None,
            });
        };

        tracing::debug!(
            session_id = %self.id,
            symptom_count = ticket.symptoms().len(),
            "Classifying session symptoms"
        );
        let (triage, state) = self
            .spawn_resolution(ticket)
            .await
            .map_err(|e| TriageError::ClassificationTask(e.to_string()))??;

        Ok(TurnReply {
            reply: outcome.reply,
            state,
            triage,
        })
    }

    /// Classify, map and resolve on a detached task. The task completes even
    /// if the returned handle is dropped.
    fn spawn_resolution(
        &self,
        ticket: ClassificationTicket,
    ) -> JoinHandle<Result<(Option<TriageResult>, ConversationState), TriageError>> {
        let session_id = self.id;
        let controller = Arc::clone(&self.controller);
        let history = Arc::clone(&self.history);
        let classifier = Arc::clone(&self.classifier);
        let mapper = self.mapper.clone();
        let patient = self.patient.clone();

        tokio::spawn(async move {
            let classification = classifier.classify(ticket.symptoms(), &patient).await;
            let triage = mapper.map(&classification, ticket.symptoms());

            let (accepted, state) = {
                let mut controller = controller.lock().map_err(|_| TriageError::LockPoisoned)?;
                let accepted = controller.resolve(ticket, triage.clone())?;
                (accepted, controller.state())
            };
            if !accepted {
                return Ok((None, state));
            }

            history
                .lock()
                .map_err(|_| TriageError::LockPoisoned)?
                .insert(0, triage.clone());
            tracing::info!(
                session_id = %session_id,
                triage_id = %triage.id,
                urgency = %triage.urgency_level(),
                action = %triage.suggested_action(),
                "Triage completed"
            );
            Ok((Some(triage), state))
        })
    }

    /// Start the dialogue over. A classification still in flight will be discarded.
    pub fn reset(&self) -> Result<(), TriageError> {
        self.controller()?.reset();
        tracing::info!(session_id = %self.id, "Session reset");
        Ok(())
    }

    pub fn state(&self) -> Result<ConversationState, TriageError> {
        Ok(self.controller()?.state())
    }

    pub fn current(&self) -> Result<Option<TriageResult>, TriageError> {
        Ok(self.controller()?.result().cloned())
    }

    pub fn clear_current(&self) -> Result<(), TriageError> {
        self.controller()?.clear_result();
        Ok(())
    }

    pub fn history(&self) -> Result<Vec<TriageResult>, TriageError> {
        Ok(self.history_mut()?.clone())
    }

    pub fn turns(&self) -> Result<Vec<ConversationTurn>, TriageError> {
        Ok(self.controller()?.turns().to_vec())
    }

    pub fn symptoms(&self) -> Result<SymptomSet, TriageError> {
        Ok(self.controller()?.symptoms().clone())
    }
}
