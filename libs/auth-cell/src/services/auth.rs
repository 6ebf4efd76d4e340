use tracing::{debug, info};

use shared_backend::BackendClient;
use shared_models::auth::{AuthResponse, LoginRequest, RegisterRequest, Role, User};
use shared_models::ApiResult;

/// Register, login and logout against `/auth`.
///
/// A successful register or login stores the returned token in the client's
/// session, so every service built on a clone of the same client is
/// authenticated from then on.
pub struct AuthService {
    backend: BackendClient,
}

impl AuthService {
    pub fn new(backend: &BackendClient) -> Self {
        Self {
            backend: backend.clone(),
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
        role: Option<Role>,
    ) -> ApiResult<AuthResponse> {
        debug!("Registering new account");

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.map(str::to_string),
            role,
        };

        let response: AuthResponse = self.backend.post("/auth/register", &request).await?;
        self.backend.set_token(response.token.clone()).await;

        info!("Registered user {} as {}", response.user.id, response.user.role);
        Ok(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        debug!("Logging in");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.backend.post("/auth/login", &request).await?;
        self.backend.set_token(response.token.clone()).await;

        info!("User {} logged in", response.user.id);
        Ok(response)
    }

    pub async fn me(&self) -> ApiResult<User> {
        self.backend.get("/auth/me").await
    }

    /// Drops the session token. Nothing is sent to the backend.
    pub async fn logout(&self) {
        self.backend.clear_token().await;
        info!("Session cleared");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.backend.is_authenticated().await
    }
}
