use chrono::{DateTime, Utc};
use serde::Serialize;

use appointment_cell::{next_appointment, Appointment};
use health_profile_cell::PatientProfile;
use medication_cell::{adherence, next_dose, AdherenceSummary, MedicationEvent};

/// Everything the home screen shows, built from one round of fetches.
#[derive(Debug, Clone, Serialize)]
pub struct HomeOverview {
    pub profile: PatientProfile,
    pub next_dose: Option<MedicationEvent>,
    pub next_appointment: Option<Appointment>,
    pub adherence: AdherenceSummary,
}

impl HomeOverview {
    pub fn build(
        profile: PatientProfile,
        appointments: &[Appointment],
        events: &[MedicationEvent],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            profile,
            next_dose: next_dose(events).cloned(),
            next_appointment: next_appointment(appointments, now).cloned(),
            adherence: adherence(events),
        }
    }

    pub fn adherence_percentage(&self) -> Option<u8> {
        self.adherence.percentage()
    }
}
