pub mod client;
pub mod overview;
pub mod telemetry;

pub use client::CompanionClient;
pub use overview::HomeOverview;

pub use shared_config::AppConfig;
pub use shared_models::{ApiError, ApiResult};
