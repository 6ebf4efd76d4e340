pub mod services;

pub use services::AuthService;
pub use shared_models::auth::{AuthResponse, LoginRequest, RegisterRequest, Role, User};
