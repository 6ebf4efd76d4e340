use tracing::{debug, info};
use uuid::Uuid;

use shared_backend::BackendClient;
use shared_models::ApiResult;

use crate::models::{
    Appointment, AppointmentStatus, CreateAppointmentRequest, UpdateAppointmentRequest,
};

pub struct AppointmentService {
    backend: BackendClient,
}

impl AppointmentService {
    pub fn new(backend: &BackendClient) -> Self {
        Self {
            backend: backend.clone(),
        }
    }

    /// The caller's appointments, newest first.
    pub async fn list(&self) -> ApiResult<Vec<Appointment>> {
        debug!("Fetching appointments");
        self.backend.get("/appointments").await
    }

    pub async fn create(&self, request: &CreateAppointmentRequest) -> ApiResult<Appointment> {
        debug!("Booking appointment starting {}", request.start_time);

        let appointment: Appointment = self.backend.post("/appointments", request).await?;

        info!("Appointment {} booked", appointment.id);
        Ok(appointment)
    }

    pub async fn update(
        &self,
        appointment_id: Uuid,
        request: &UpdateAppointmentRequest,
    ) -> ApiResult<Appointment> {
        debug!("Updating appointment: {}", appointment_id);
        let path = format!("/appointments/{}", appointment_id);
        self.backend.patch(&path, request).await
    }

    pub async fn update_status(&self, appointment_id: Uuid, status: &str) -> ApiResult<Appointment> {
        let request = UpdateAppointmentRequest {
            status: Some(status.to_string()),
            ..UpdateAppointmentRequest::default()
        };
        self.update(appointment_id, &request).await
    }

    pub async fn cancel(&self, appointment_id: Uuid) -> ApiResult<Appointment> {
        self.update_status(appointment_id, AppointmentStatus::Cancelled.as_str())
            .await
    }
}
