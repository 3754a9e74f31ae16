use serde::{Deserialize, Serialize};

pub const SPECIALTY_URGENT_CARE: &str = "Urgent Care";
pub const SPECIALTY_EMERGENCY_MEDICINE: &str = "Emergency Medicine";
pub const SPECIALTY_TELE_CONSULT: &str = "Tele-Consult";

/// A directory entry. Owned by the external catalog; never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub rating: f64,
    /// Free-form label such as "0.8 mi" or "Virtual".
    #[serde(alias = "distance")]
    pub distance_label: String,
    pub available_slots: Vec<String>,
    pub accepts_insurance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Provider {
    pub fn has_slot(&self, slot: &str) -> bool {
        self.available_slots.iter().any(|s| s == slot)
    }

    pub fn is_tele_consult(&self) -> bool {
        self.specialty == SPECIALTY_TELE_CONSULT
    }
}
