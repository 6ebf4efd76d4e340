use chrono::{DateTime, Utc};

use crate::models::{Appointment, AppointmentStatus};

/// Appointments split the way the reports tab shows them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agenda {
    /// Scheduled or confirmed, soonest first.
    pub upcoming: Vec<Appointment>,
    /// Completed, cancelled or no-show, most recent first.
    pub past: Vec<Appointment>,
}

/// Statuses outside the known set land in neither list.
pub fn partition(appointments: &[Appointment]) -> Agenda {
    let mut agenda = Agenda::default();

    for appointment in appointments {
        match appointment.known_status() {
            Some(status) if status.is_upcoming() => agenda.upcoming.push(appointment.clone()),
            Some(
                AppointmentStatus::Completed
                | AppointmentStatus::Cancelled
                | AppointmentStatus::NoShow,
            ) => agenda.past.push(appointment.clone()),
            _ => {}
        }
    }

    agenda.upcoming.sort_by_key(|a| a.starts_at());
    agenda.past.sort_by_key(|a| std::cmp::Reverse(a.starts_at()));
    agenda
}

/// The soonest upcoming appointment that has not started before `now`.
pub fn next_appointment(appointments: &[Appointment], now: DateTime<Utc>) -> Option<&Appointment> {
    appointments
        .iter()
        .filter(|a| a.known_status().is_some_and(|status| status.is_upcoming()))
        .filter_map(|a| a.starts_at().map(|start| (start, a)))
        .filter(|(start, _)| *start >= now)
        .min_by_key(|(start, _)| *start)
        .map(|(_, a)| a)
}
