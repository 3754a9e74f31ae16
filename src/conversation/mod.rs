pub mod controller;
pub mod prompts;

pub use controller::*;

use serde::{Deserialize, Serialize};

/// Where the guided triage dialogue currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Greeting,
    CollectingChiefComplaint,
    CollectingDuration,
    CollectingSeverity,
    CollectingAdditional,
    Analyzing,
    Resolved,
}

impl ConversationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::CollectingChiefComplaint => "collecting_chief_complaint",
            Self::CollectingDuration => "collecting_duration",
            Self::CollectingSeverity => "collecting_severity",
            Self::CollectingAdditional => "collecting_additional",
            Self::Analyzing => "analyzing",
            Self::Resolved => "resolved",
        }
    }

    /// State reached once `patient_turns` turns have been recorded.
    pub fn after_patient_turns(patient_turns: u32, min_turns_before_analysis: u32) -> Self {
        if patient_turns >= min_turns_before_analysis {
            return Self::Analyzing;
        }
        match patient_turns {
            0 => Self::CollectingChiefComplaint,
            1 => Self::CollectingDuration,
            2 => Self::CollectingSeverity,
            _ => Self::CollectingAdditional,
        }
    }

    /// Whether a patient turn may be recorded in this state.
    pub fn accepts_patient_turn(&self) -> bool {
        !matches!(self, Self::Analyzing | Self::Resolved)
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
