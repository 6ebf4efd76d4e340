use tracing::{debug, info};

use shared_backend::BackendClient;
use shared_models::ApiResult;

use crate::models::{PatientProfile, ProfileStatus, UpdateProfileRequest};

pub struct ProfileService {
    backend: BackendClient,
}

impl ProfileService {
    pub fn new(backend: &BackendClient) -> Self {
        Self {
            backend: backend.clone(),
        }
    }

    /// Whether onboarding still has to collect the profile.
    pub async fn status(&self) -> ApiResult<ProfileStatus> {
        debug!("Checking profile status");
        self.backend.get("/me/profile-status").await
    }

    pub async fn get(&self) -> ApiResult<PatientProfile> {
        debug!("Fetching profile");
        self.backend.get("/me/profile").await
    }

    pub async fn update(&self, request: &UpdateProfileRequest) -> ApiResult<PatientProfile> {
        debug!("Saving profile");

        let profile: PatientProfile = self.backend.put("/me/profile", request).await?;

        info!("Profile saved");
        Ok(profile)
    }
}
