//! Urgency mapping: classification score → tier, care pathway and patient-facing text.

use crate::models::{ClassificationResult, SymptomSet, TriageResult, UrgencyTier};

const FALLBACK_NOTE: &str = "Note: automated scoring was unavailable, so this assessment \
was produced by rule-based symptom screening.";

#[derive(Debug, Clone)]
pub struct UrgencyMapper {
    annotate_fallback: bool,
}

impl Default for UrgencyMapper {
    fn default() -> Self {
        Self {
            annotate_fallback: true,
        }
    }
}

impl UrgencyMapper {
    pub fn new(annotate_fallback: bool) -> Self {
        Self { annotate_fallback }
    }

    /// Build the triage result for one classification.
    pub fn map(&self, classification: &ClassificationResult, symptoms: &SymptomSet) -> TriageResult {
        let tier = UrgencyTier::from_score(classification.urgency_score);

        let mut recommendation = render_recommendation(
            tier,
            &classification.recommended_specialty,
            &classification.key_findings,
        );
        if self.annotate_fallback && classification.is_fallback() {
            recommendation.push_str("\n\n");
            recommendation.push_str(FALLBACK_NOTE);
        }

        TriageResult::new(
            tier,
            symptoms.clone(),
            recommendation,
            Some(classification.confidence),
            Some(classification.urgency_score * 100.0),
        )
    }
}

/// Recommendation text for a tier. Findings are listed verbatim, one bullet each.
pub fn render_recommendation(tier: UrgencyTier, specialty: &str, findings: &[String]) -> String {
    let (heading, action) = match tier {
        UrgencyTier::Emergency => (
            "EMERGENCY ASSESSMENT",
            format!(
                "Call 911 or go to the nearest emergency room immediately. Your symptoms \
                 require urgent medical attention from {specialty} specialists."
            ),
        ),
        UrgencyTier::High => (
            "HIGH PRIORITY",
            format!(
                "Seek prompt medical attention. Visit an urgent care center or schedule a \
                 same-day appointment with a {specialty} provider."
            ),
        ),
        UrgencyTier::Moderate => (
            "MODERATE PRIORITY",
            format!(
                "Schedule an appointment with a {specialty} provider within the next few \
                 days for proper evaluation."
            ),
        ),
        UrgencyTier::Low => (
            "LOW PRIORITY",
            format!(
                "Monitor your symptoms. Consider self-care measures and schedule a routine \
                 check-up with a {specialty} provider if symptoms persist."
            ),
        ),
    };

    if findings.is_empty() {
        return format!("{heading}\n\nRecommended Action: {action}");
    }
    let findings_list = findings
        .iter()
        .map(|f| format!("• {f}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{heading}\n\nAnalysis Findings:\n{findings_list}\n\nRecommended Action: {action}")
}
