pub mod events;
pub mod medication;
pub mod schedule;

pub use events::MedicationEventService;
pub use medication::MedicationService;
pub use schedule::{adherence, next_dose, AdherenceSummary};
