pub mod types;
pub mod fallback;
pub mod http;
pub mod mock;
pub mod orchestrator;

pub use types::*;
pub use fallback::*;
pub use http::*;
pub use mock::*;
pub use orchestrator::*;

use thiserror::Error;

/// Why a remote classification could not be used.
///
/// Every variant degrades to the rule fallback; none reaches the patient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("No remote classifier configured")]
    NotConfigured,

    #[error("Classifier is not reachable at {0}")]
    Connection(String),

    #[error("Classifier timed out after {0}ms")]
    Timeout(u64),

    #[error("Classifier returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),
}
