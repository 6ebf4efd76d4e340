pub mod auth;
pub mod common;
pub mod error;
pub mod time;

pub use error::{ApiError, ApiResult};
