use tracing::{debug, info};
use uuid::Uuid;

use shared_backend::{BackendClient, Method, RequestBody};
use shared_models::ApiResult;

use crate::models::{MarkTakenResponse, MedicationEvent};

/// Read access to scheduled doses plus the single "mark taken" transition.
pub struct MedicationEventService {
    backend: BackendClient,
}

impl MedicationEventService {
    pub fn new(backend: &BackendClient) -> Self {
        Self {
            backend: backend.clone(),
        }
    }

    /// Today's doses, ordered by scheduled time by the backend.
    pub async fn today(&self) -> ApiResult<Vec<MedicationEvent>> {
        debug!("Fetching today's medication events");
        self.backend.get("/medication-events/today").await
    }

    pub async fn mark_taken(&self, event_id: Uuid) -> ApiResult<MarkTakenResponse> {
        let path = format!("/medication-events/{}/mark-taken", event_id);
        let response: MarkTakenResponse = self
            .backend
            .request(Method::PATCH, &path, RequestBody::Empty)
            .await?;

        info!("Medication event {} marked as taken", response.event_id);
        Ok(response)
    }
}
