pub mod agenda;
pub mod appointment;

pub use agenda::{next_appointment, partition, Agenda};
pub use appointment::AppointmentService;
