//! Dose summaries computed from an already-fetched list of events.

use serde::Serialize;

use crate::models::{EventStatus, MedicationEvent};

/// The earliest dose still waiting to be taken.
///
/// Overdue doses still count: a dose scheduled for 08:00 that is still
/// `scheduled` at 09:00 is the one the patient should take next. Events whose
/// timestamp cannot be read are ignored.
pub fn next_dose(events: &[MedicationEvent]) -> Option<&MedicationEvent> {
    events
        .iter()
        .filter(|event| event.status == EventStatus::Scheduled)
        .filter_map(|event| event.scheduled_at().map(|at| (at, event)))
        .min_by_key(|(at, _)| *at)
        .map(|(_, event)| event)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdherenceSummary {
    pub total: usize,
    pub taken: usize,
    pub skipped: usize,
    pub missed: usize,
    pub scheduled: usize,
}

impl AdherenceSummary {
    /// Taken doses as a rounded percentage of all doses; `None` with no doses.
    pub fn percentage(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        Some(((self.taken * 100 + self.total / 2) / self.total) as u8)
    }
}

pub fn adherence(events: &[MedicationEvent]) -> AdherenceSummary {
    events
        .iter()
        .fold(AdherenceSummary::default(), |mut summary, event| {
            summary.total += 1;
            match event.status {
                EventStatus::Taken => summary.taken += 1,
                EventStatus::Skipped => summary.skipped += 1,
                EventStatus::Missed => summary.missed += 1,
                EventStatus::Scheduled => summary.scheduled += 1,
            }
            summary
        })
}
