// libs/medication-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_models::time::parse_timestamp;

// ==============================================================================
// MEDICATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub id: Uuid,
    pub patient_id: Uuid,
    #[serde(default)]
    pub prescribed_by: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub instructions: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Medication {
    /// "Metformin 500mg" style label, or just the name when no dosage is recorded.
    pub fn label(&self) -> String {
        match &self.dosage {
            Some(dosage) if !dosage.trim().is_empty() => format!("{} {}", self.name, dosage),
            _ => self.name.clone(),
        }
    }
}

/// Body for `POST /medications`.
///
/// `patient_id` is only read by the backend when a doctor is prescribing;
/// a patient always creates medications for themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMedicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CreateMedicationRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_dosage(mut self, dosage: impl Into<String>) -> Self {
        self.dosage = Some(dosage.into());
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    pub fn for_patient(mut self, patient_id: Uuid) -> Self {
        self.patient_id = Some(patient_id);
        self
    }
}

/// Partial update for `PATCH /medications/{id}`. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMedicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ==============================================================================
// MEDICATION EVENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Scheduled,
    Taken,
    Skipped,
    Missed,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Scheduled => write!(f, "scheduled"),
            EventStatus::Taken => write!(f, "taken"),
            EventStatus::Skipped => write!(f, "skipped"),
            EventStatus::Missed => write!(f, "missed"),
        }
    }
}

/// One scheduled dose. Distinct from the `Medication` it was generated from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationEvent {
    pub id: Uuid,
    pub medication_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    pub scheduled_time: String,
    #[serde(default)]
    pub taken_time: Option<String>,
    pub status: EventStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub reminder_id: Option<String>,
}

impl MedicationEvent {
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.scheduled_time)
    }

    pub fn taken_at(&self) -> Option<DateTime<Utc>> {
        self.taken_time.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkTakenResponse {
    pub ok: bool,
    pub event_id: Uuid,
}
