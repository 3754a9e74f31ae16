pub mod booking;
pub mod classifier;
pub mod config;
pub mod conversation;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod models;
pub mod recommend;
pub mod session;
pub mod sessions;
pub mod symptoms;

pub use classifier::{
    ClassifierError, HttpScorer, MockScorer, PatientContext, RemoteScorer, UrgencyClassifier,
};
pub use config::TriageConfig;
pub use conversation::{ConversationController, ConversationState};
pub use engine::TriageEngine;
pub use error::TriageError;
pub use session::{TriageSession, TurnReply};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default filter.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} v{} logging initialised", config::APP_NAME, config::APP_VERSION);
    }
}
