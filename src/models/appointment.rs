use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AppointmentStatus, AppointmentType};
use super::provider::Provider;
use super::symptom::SymptomSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub provider_id: String,
    pub provider_name: String,
    /// `None` when the slot label carries no date and no placeholder was configured.
    pub date: Option<NaiveDate>,
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub symptoms: SymptomSet,
}

impl AppointmentType {
    /// Tele-Consult providers are booked remotely, everyone else in person.
    pub fn for_provider(provider: &Provider) -> Self {
        if provider.is_tele_consult() {
            Self::TeleConsult
        } else {
            Self::InPerson
        }
    }
}
