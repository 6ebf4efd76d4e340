use tracing::debug;
use uuid::Uuid;

use shared_backend::BackendClient;
use shared_models::common::OkResponse;
use shared_models::ApiResult;

use crate::models::{CreateMedicationRequest, Medication, UpdateMedicationRequest};

pub struct MedicationService {
    backend: BackendClient,
}

impl MedicationService {
    pub fn new(backend: &BackendClient) -> Self {
        Self {
            backend: backend.clone(),
        }
    }

    /// Patients get their own medications, doctors the ones they prescribed.
    pub async fn list(&self) -> ApiResult<Vec<Medication>> {
        debug!("Fetching medications");
        self.backend.get("/medications").await
    }

    pub async fn create(&self, request: &CreateMedicationRequest) -> ApiResult<Medication> {
        debug!("Creating medication: {}", request.name);
        self.backend.post("/medications", request).await
    }

    pub async fn update(
        &self,
        medication_id: Uuid,
        request: &UpdateMedicationRequest,
    ) -> ApiResult<Medication> {
        debug!("Updating medication: {}", medication_id);
        let path = format!("/medications/{}", medication_id);
        self.backend.patch(&path, request).await
    }

    pub async fn delete(&self, medication_id: Uuid) -> ApiResult<OkResponse> {
        debug!("Deleting medication: {}", medication_id);
        let path = format!("/medications/{}", medication_id);
        self.backend.delete(&path).await
    }
}
