use serde::{Deserialize, Serialize};

use super::enums::Speaker;

/// One recorded line of the triage dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    pub sequence_number: u32,
}

impl ConversationTurn {
    pub fn is_patient(&self) -> bool {
        self.speaker == Speaker::Patient
    }
}
