//! Canned assistant replies, keyed by dialogue state.
//!
//! Stateless: the controller passes in the state it was in when the patient
//! turn arrived, and gets back the text to show next.

use super::ConversationState;

pub const GREETING: &str = "Hello! I'm your triage assistant. I'll ask a few questions about how \
you're feeling and point you to the right care. What symptoms are you experiencing today?";

pub const DURATION_PROMPT: &str = "How long have you been experiencing these symptoms? Please \
specify in hours, days, or weeks.";

pub const SEVERITY_PROMPT: &str = "On a scale of 1-10, with 10 being the most severe, how would \
you rate your symptoms?";

pub const ADDITIONAL_PROMPT: &str = "Are you experiencing any other symptoms I should know about?";

pub const MORE_DETAIL_PROMPT: &str = "I understand. Can you provide more details about your \
symptoms?";

pub const ANALYZING_NOTICE: &str = "Thank you for providing that information. I'm now analyzing \
your symptoms to prepare a recommendation.";

/// Urgent phrases answered immediately, whatever the dialogue state.
const URGENT_REPLIES: &[(&[&str], &str)] = &[
    (
        &["chest pain", "heart"],
        "I understand you're experiencing chest pain. This could be serious. Are you also \
         experiencing shortness of breath, nausea, or pain radiating to your arm or jaw? If \
         yes, please call 911 immediately.",
    ),
    (
        &["breathing", "breath"],
        "Difficulty breathing requires immediate attention. Can you describe how severe it \
         is? Are your lips or fingernails turning blue? If so, call 911 now.",
    ),
];

/// Follow-ups for common chief complaints.
const SYMPTOM_FOLLOW_UPS: &[(&str, &str)] = &[
    (
        "headache",
        "I understand you have a headache. Is it mild, moderate, or severe? How long have you \
         had it? Is it accompanied by fever, vision changes, or nausea?",
    ),
    (
        "fever",
        "A fever can indicate infection. What is your temperature, and how long have you had \
         it? Are you experiencing chills, body aches, or other symptoms?",
    ),
    (
        "cough",
        "I see you have a cough. Is it dry or producing mucus, and how long has it lasted? Are \
         you experiencing shortness of breath or chest pain with it?",
    ),
];

/// High-salience reply for urgent phrases, if the text contains one.
pub fn urgent_reply(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    URGENT_REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
}

fn symptom_follow_up(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    SYMPTOM_FOLLOW_UPS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, reply)| *reply)
}

/// Elicitation prompt for a patient turn received in `state`.
pub fn elicitation_prompt(state: ConversationState, text: &str) -> &'static str {
    match state {
        ConversationState::Greeting | ConversationState::CollectingChiefComplaint => {
            symptom_follow_up(text).unwrap_or(DURATION_PROMPT)
        }
        ConversationState::CollectingDuration => SEVERITY_PROMPT,
        ConversationState::CollectingSeverity => ADDITIONAL_PROMPT,
        ConversationState::CollectingAdditional
        | ConversationState::Analyzing
        | ConversationState::Resolved => MORE_DETAIL_PROMPT,
    }
}

/// Full reply selection: urgent phrases win, then the analysis notice, then the state prompt.
pub fn select_reply(pre_state: ConversationState, text: &str, entering_analysis: bool) -> &'static str {
    if let Some(reply) = urgent_reply(text) {
        return reply;
    }
    if entering_analysis {
        return ANALYZING_NOTICE;
    }
    elicitation_prompt(pre_state, text)
}
