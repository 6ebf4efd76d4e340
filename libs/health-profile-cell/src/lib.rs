pub mod models;
pub mod services;

pub use models::{PatientProfile, ProfileStatus, UpdateProfileRequest};
pub use services::ProfileService;
