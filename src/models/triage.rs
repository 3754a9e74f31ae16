use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use uuid::Uuid;

use super::enums::{SuggestedAction, UrgencyLevel};
use super::symptom::SymptomSet;

/// Wait estimate quoted for the urgent-care tier.
pub const URGENT_CARE_WAIT: &str = "30-60 min";

/// One row of the urgency threshold table.
///
/// Urgency level, suggested action and wait estimate are all read off the
/// same tier, so a result can never pair a level with the wrong action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrgencyTier {
    Emergency,
    High,
    Moderate,
    Low,
}

impl UrgencyTier {
    /// Lower bounds are closed: a score of exactly 0.8 is an emergency.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Emergency
        } else if score >= 0.6 {
            Self::High
        } else if score >= 0.4 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn urgency_level(self) -> UrgencyLevel {
        match self {
            Self::Emergency => UrgencyLevel::Emergency,
            Self::High => UrgencyLevel::High,
            Self::Moderate => UrgencyLevel::Moderate,
            Self::Low => UrgencyLevel::Low,
        }
    }

    pub fn suggested_action(self) -> SuggestedAction {
        match self {
            Self::Emergency => SuggestedAction::Emergency,
            Self::High => SuggestedAction::UrgentCare,
            Self::Moderate => SuggestedAction::Clinic,
            Self::Low => SuggestedAction::SelfCare,
        }
    }

    pub fn estimated_wait_time(self) -> Option<&'static str> {
        match self {
            Self::High => Some(URGENT_CARE_WAIT),
            _ => None,
        }
    }
}

/// Actionable outcome of a triage, built by the urgency mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct TriageResult {
    pub id: Uuid,
    tier: UrgencyTier,
    pub primary_symptoms: SymptomSet,
    pub recommendation: String,
    pub ml_confidence: Option<f64>,
    /// Urgency on a 0-100 scale.
    pub risk_score: Option<f64>,
    pub timestamp: NaiveDateTime,
}

impl TriageResult {
    pub(crate) fn new(
        tier: UrgencyTier,
        primary_symptoms: SymptomSet,
        recommendation: String,
        ml_confidence: Option<f64>,
        risk_score: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tier,
            primary_symptoms,
            recommendation,
            ml_confidence,
            risk_score,
            timestamp: chrono::Local::now().naive_local(),
        }
    }

    pub fn tier(&self) -> UrgencyTier {
        self.tier
    }

    pub fn urgency_level(&self) -> UrgencyLevel {
        self.tier.urgency_level()
    }

    pub fn suggested_action(&self) -> SuggestedAction {
        self.tier.suggested_action()
    }

    pub fn estimated_wait_time(&self) -> Option<&'static str> {
        self.tier.estimated_wait_time()
    }
}

impl Serialize for TriageResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TriageResult", 9)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("urgencyLevel", &self.urgency_level())?;
        state.serialize_field("primarySymptoms", &self.primary_symptoms)?;
        state.serialize_field("recommendation", &self.recommendation)?;
        state.serialize_field("suggestedAction", &self.suggested_action())?;
        state.serialize_field("estimatedWaitTime", &self.estimated_wait_time())?;
        state.serialize_field("mlConfidence", &self.ml_confidence)?;
        state.serialize_field("riskScore", &self.risk_score)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.end()
    }
}
