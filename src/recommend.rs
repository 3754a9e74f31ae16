//! Provider recommendation: filter the directory by care pathway, rank by distance.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{
    Provider, SuggestedAction, TriageResult, SPECIALTY_EMERGENCY_MEDICINE, SPECIALTY_TELE_CONSULT,
    SPECIALTY_URGENT_CARE,
};

/// Leading unsigned number of a distance label ("0.8 mi" → 0.8).
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d*)?|\.\d+)").expect("valid distance regex")
});

const ACUTE_SPECIALTIES: &[&str] = &[SPECIALTY_URGENT_CARE, SPECIALTY_EMERGENCY_MEDICINE];
const REMOTE_SPECIALTIES: &[&str] = &[SPECIALTY_TELE_CONSULT];

/// Specialties a suggested action may be routed to. `None` means any specialty.
pub fn allowed_specialties(action: SuggestedAction) -> Option<&'static [&'static str]> {
    match action {
        SuggestedAction::UrgentCare | SuggestedAction::Emergency => Some(ACUTE_SPECIALTIES),
        SuggestedAction::SelfCare => Some(REMOTE_SPECIALTIES),
        SuggestedAction::Clinic => None,
    }
}

/// Numeric distance from a label; virtual or unparseable labels sort last.
pub fn parse_distance(label: &str) -> f64 {
    LEADING_NUMBER
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|d| d.is_finite())
        .unwrap_or(f64::INFINITY)
}

/// Nearest first; equal distances put the higher rating first.
fn rank(a: &Provider, b: &Provider) -> Ordering {
    parse_distance(&a.distance_label)
        .total_cmp(&parse_distance(&b.distance_label))
        .then_with(|| b.rating.total_cmp(&a.rating))
}

/// Providers suited to the triage outcome, ranked. An empty list is a valid answer.
pub fn recommend(triage: &TriageResult, directory: &[Provider]) -> Vec<Provider> {
    recommend_for_action(triage.suggested_action(), directory)
}

pub fn recommend_for_action(action: SuggestedAction, directory: &[Provider]) -> Vec<Provider> {
    let allowed = allowed_specialties(action);
    let mut matches: Vec<Provider> = directory
        .iter()
        .filter(|p| allowed.map_or(true, |specialties| specialties.iter().any(|s| *s == p.specialty)))
        .cloned()
        .collect();
    matches.sort_by(rank);

    tracing::debug!(
        action = %action,
        directory_size = directory.len(),
        matched = matches.len(),
        "Ranked providers for suggested action"
    );
    matches
}
