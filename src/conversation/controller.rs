use super::prompts;
use super::ConversationState;
use crate::config::TriageConfig;
use crate::error::TriageError;
use crate::models::{ConversationTurn, Speaker, SymptomSet, TriageResult};
use crate::symptoms::SymptomExtractor;

/// Permission to run the one classification of a session generation.
///
/// Issued when the dialogue enters `Analyzing`; handed back with the result.
#[derive(Debug)]
pub struct ClassificationTicket {
    generation: u64,
    symptoms: SymptomSet,
}

impl ClassificationTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Symptom snapshot taken when the dialogue entered `Analyzing`.
    pub fn symptoms(&self) -> &SymptomSet {
        &self.symptoms
    }
}

/// What `record_turn` produced.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    pub state: ConversationState,
    /// Present exactly once per session generation: on the turn that enters `Analyzing`.
    pub ticket: Option<ClassificationTicket>,
}

/// Finite-state driver for one triage dialogue.
///
/// Owns the session's turns, symptom set and result. Pure state: it never
/// performs I/O, so the classification itself is run by the caller against
/// the ticket handed out on entry to `Analyzing`.
#[derive(Debug)]
pub struct ConversationController {
    state: ConversationState,
    turns: Vec<ConversationTurn>,
    symptoms: SymptomSet,
    patient_turns: u32,
    min_turns_before_analysis: u32,
    generation: u64,
    result: Option<TriageResult>,
    extractor: SymptomExtractor,
}

impl ConversationController {
    pub fn new(extractor: SymptomExtractor, min_turns_before_analysis: u32) -> Self {
        Self {
            state: ConversationState::Greeting,
            turns: Vec::new(),
            symptoms: SymptomSet::new(),
            patient_turns: 0,
            min_turns_before_analysis: min_turns_before_analysis.max(1),
            generation: 0,
            result: None,
            extractor,
        }
    }

    /// Emergency keywords are always extracted, even when the vocabulary omits them,
    /// so the rule fallback can see them.
    pub fn from_config(config: &TriageConfig) -> Self {
        let phrases = config
            .symptom_vocabulary
            .iter()
            .chain(config.emergency_keywords.iter());
        Self::new(SymptomExtractor::new(phrases), config.min_turns_before_analysis)
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn symptoms(&self) -> &SymptomSet {
        &self.symptoms
    }

    pub fn result(&self) -> Option<&TriageResult> {
        self.result.as_ref()
    }

    pub fn patient_turn_count(&self) -> u32 {
        self.patient_turns
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Open the dialogue: record the assistant greeting and wait for the chief complaint.
    pub fn greet(&mut self) -> Result<String, TriageError> {
        if self.state != ConversationState::Greeting {
            return Err(TriageError::InvalidStateTransition {
                state: self.state,
                operation: "greet",
            });
        }
        self.push_turn(Speaker::Assistant, prompts::GREETING);
        self.transition(ConversationState::CollectingChiefComplaint);
        Ok(prompts::GREETING.to_string())
    }

    /// Record one patient turn and return the assistant's reply.
    ///
    /// A turn arriving in `Greeting` is taken as the chief complaint.
    pub fn record_turn(&mut self, text: &str) -> Result<TurnOutcome, TriageError> {
        if !self.state.accepts_patient_turn() {
            return Err(match self.state {
                ConversationState::Analyzing => TriageError::ConflictingOperation,
                state => TriageError::InvalidStateTransition {
                    state,
                    operation: "record a turn",
                },
            });
        }

        let pre_state = self.state;
        self.push_turn(Speaker::Patient, text);
        self.extractor.accumulate(&mut self.symptoms, text);
        self.patient_turns += 1;

        let next = ConversationState::after_patient_turns(
            self.patient_turns,
            self.min_turns_before_analysis,
        );
        let entering_analysis = next == ConversationState::Analyzing;

        let reply = prompts::select_reply(pre_state, text, entering_analysis);
        self.push_turn(Speaker::Assistant, reply);
        self.transition(next);

        let ticket = entering_analysis.then(|| ClassificationTicket {
            generation: self.generation,
            symptoms: self.symptoms.clone(),
        });

        Ok(TurnOutcome {
            reply: reply.to_string(),
            state: self.state,
            ticket,
        })
    }

    /// Hand back the triage for a ticket.
    ///
    /// Returns `Ok(false)` and leaves the session untouched when the ticket
    /// predates a reset.
    pub fn resolve(
        &mut self,
        ticket: ClassificationTicket,
        result: TriageResult,
    ) -> Result<bool, TriageError> {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "Discarding triage result from a reset session"
            );
            return Ok(false);
        }
        if self.state != ConversationState::Analyzing {
            return Err(TriageError::InvalidStateTransition {
                state: self.state,
                operation: "resolve a classification",
            });
        }
        self.result = Some(result);
        self.transition(ConversationState::Resolved);
        Ok(true)
    }

    /// Drop the current triage result while keeping the dialogue resolved.
    pub fn clear_result(&mut self) {
        self.result = None;
    }

    /// Start over. Any outstanding ticket becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ConversationState::Greeting;
        self.turns.clear();
        self.symptoms = SymptomSet::new();
        self.patient_turns = 0;
        self.result = None;
        tracing::debug!(generation = self.generation, "Conversation reset");
    }

    fn push_turn(&mut self, speaker: Speaker, text: &str) {
        let sequence_number = self.turns.len() as u32 + 1;
        self.turns.push(ConversationTurn {
            speaker,
            text: text.to_string(),
            sequence_number,
        });
    }

    fn transition(&mut self, next: ConversationState) {
        if next != self.state {
            tracing::debug!(from = %self.state, to = %next, "Conversation state transition");
            self.state = next;
        }
    }
}
