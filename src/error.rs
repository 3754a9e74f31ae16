use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;
use crate::conversation::ConversationState;

/// Errors surfaced to callers of the triage core.
///
/// Classifier failures never appear here: they are absorbed by the rule fallback.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("A classification is already in progress for this session")]
    ConflictingOperation,

    #[error("Slot '{slot}' is not offered by provider {provider_id}")]
    InvalidSlot { provider_id: String, slot: String },

    #[error("Cannot {operation} while conversation is {state}")]
    InvalidStateTransition {
        state: ConversationState,
        operation: &'static str,
    },

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Classification task failed: {0}")]
    ClassificationTask(String),

    #[error("Internal lock poisoned")]
    LockPoisoned,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Classifier setup failed: {0}")]
    ClassifierSetup(String),
}
