//! Booking: turns a provider and one of its slot labels into an appointment record.
//!
//! Slot labels are free text from the directory. "Today …" and "Tomorrow …"
//! resolve to concrete dates; any other label ("Walk-in Available", "Next Week")
//! is kept verbatim as the time and dated with the configured placeholder.
//! Records are handed back to the caller, never stored here.

use chrono::{Days, Local, NaiveDate};
use uuid::Uuid;

use crate::config::TriageConfig;
use crate::error::TriageError;
use crate::models::{Appointment, AppointmentStatus, AppointmentType, Provider, SymptomSet};

const TODAY: &str = "Today";
const TOMORROW: &str = "Tomorrow";

#[derive(Debug, Clone, Default)]
pub struct BookingCoordinator {
    unscheduled_date: Option<NaiveDate>,
}

impl BookingCoordinator {
    pub fn new(unscheduled_date: Option<NaiveDate>) -> Self {
        Self { unscheduled_date }
    }

    pub fn from_config(config: &TriageConfig) -> Self {
        Self::new(config.unscheduled_date)
    }

    /// Book against the local calendar date.
    pub fn book(
        &self,
        provider: &Provider,
        slot: &str,
        symptoms: &SymptomSet,
        appointment_type: AppointmentType,
    ) -> Result<Appointment, TriageError> {
        self.book_on(Local::now().date_naive(), provider, slot, symptoms, appointment_type)
    }

    /// Book with an explicit "today". Each call yields a new appointment id.
    pub fn book_on(
        &self,
        today: NaiveDate,
        provider: &Provider,
        slot: &str,
        symptoms: &SymptomSet,
        appointment_type: AppointmentType,
    ) -> Result<Appointment, TriageError> {
        if !provider.has_slot(slot) {
            return Err(TriageError::InvalidSlot {
                provider_id: provider.id.clone(),
                slot: slot.to_string(),
            });
        }

        let (date, time) = resolve_slot(slot, today, self.unscheduled_date);
        let appointment = Appointment {
            id: Uuid::new_v4(),
            provider_id: provider.id.clone(),
            provider_name: provider.name.clone(),
            date,
            time,
            appointment_type,
            status: AppointmentStatus::Scheduled,
            symptoms: symptoms.clone(),
        };

        tracing::info!(
            appointment_id = %appointment.id,
            provider_id = %appointment.provider_id,
            appointment_type = %appointment.appointment_type,
            "Appointment booked"
        );
        Ok(appointment)
    }
}

/// Split a slot label into (date, time).
pub fn resolve_slot(
    slot: &str,
    today: NaiveDate,
    unscheduled_date: Option<NaiveDate>,
) -> (Option<NaiveDate>, String) {
    if slot.contains(TODAY) {
        (Some(today), strip_day(slot, TODAY))
    } else if slot.contains(TOMORROW) {
        (today.checked_add_days(Days::new(1)), strip_day(slot, TOMORROW))
    } else {
        (unscheduled_date, slot.to_string())
    }
}

fn strip_day(slot: &str, day: &str) -> String {
    let time = slot.replacen(day, "", 1);
    let time = time.trim();
    if time.is_empty() {
        slot.to_string()
    } else {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn provider() -> Provider {
        Provider {
            id: "2".into(),
            name: "CityHealth Urgent Care".into(),
            specialty: "Urgent Care".into(),
            rating: 4.7,
            distance_label: "1.2 mi".into(),
            available_slots: vec![
                "Walk-in Available".into(),
                "Today 3:00 PM".into(),
                "Tomorrow 9:00 AM".into(),
            ],
            accepts_insurance: true,
            address: None,
            phone: None,
        }
    }

    fn symptoms() -> SymptomSet {
        ["fever", "cough"].into_iter().collect()
    }

    #[test]
    fn today_slot_resolves_to_current_date() {
        let appt = BookingCoordinator::default()
            .book_on(today(), &provider(), "Today 3:00 PM", &symptoms(), AppointmentType::InPerson)
            .unwrap();
        assert_eq!(appt.date, Some(today()));
        assert_eq!(appt.time, "3:00 PM");
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.provider_name, "CityHealth Urgent Care");
        assert_eq!(appt.symptoms, symptoms());
    }

    #[test]
    fn tomorrow_slot_resolves_to_next_day() {
        let appt = BookingCoordinator::default()
            .book_on(today(), &provider(), "Tomorrow 9:00 AM", &symptoms(), AppointmentType::InPerson)
            .unwrap();
        assert_eq!(appt.date, NaiveDate::from_ymd_opt(2026, 3, 15));
        assert_eq!(appt.time, "9:00 AM");
    }

    #[test]
    fn undated_slot_uses_configured_placeholder() {
        let placeholder = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let appt = BookingCoordinator::new(Some(placeholder))
            .book_on(today(), &provider(), "Walk-in Available", &symptoms(), AppointmentType::InPerson)
            .unwrap();
        assert_eq!(appt.date, Some(placeholder));
        assert_eq!(appt.time, "Walk-in Available");
    }

    #[test]
    fn undated_slot_without_placeholder_has_no_date() {
        let appt = BookingCoordinator::default()
            .book_on(today(), &provider(), "Walk-in Available", &symptoms(), AppointmentType::InPerson)
            .unwrap();
        assert_eq!(appt.date, None);
    }

    #[test]
    fn slot_not_offered_is_rejected() {
        let err = BookingCoordinator::default()
            .book_on(today(), &provider(), "Today 9:00 AM", &symptoms(), AppointmentType::InPerson)
            .unwrap_err();
        match err {
            TriageError::InvalidSlot { provider_id, slot } => {
                assert_eq!(provider_id, "2");
                assert_eq!(slot, "Today 9:00 AM");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn repeat_bookings_get_distinct_ids() {
        let coordinator = BookingCoordinator::default();
        let a = coordinator
            .book_on(today(), &provider(), "Today 3:00 PM", &symptoms(), AppointmentType::InPerson)
            .unwrap();
        let b = coordinator
            .book_on(today(), &provider(), "Today 3:00 PM", &symptoms(), AppointmentType::InPerson)
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn appointment_type_follows_provider() {
        let mut tele = provider();
        tele.specialty = "Tele-Consult".into();
        assert_eq!(AppointmentType::for_provider(&tele), AppointmentType::TeleConsult);
        assert_eq!(AppointmentType::for_provider(&provider()), AppointmentType::InPerson);
    }

    #[test]
    fn serialized_appointment_uses_wire_names() {
        let appt = BookingCoordinator::default()
            .book_on(today(), &provider(), "Today 3:00 PM", &symptoms(), AppointmentType::TeleConsult)
            .unwrap();
        let value = serde_json::to_value(&appt).unwrap();
        assert_eq!(value["type"], "tele-consult");
        assert_eq!(value["status"], "scheduled");
        assert_eq!(value["date"], "2026-03-14");
        assert_eq!(value["providerId"], "2");
    }
}
