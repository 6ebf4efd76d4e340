use tracing::{debug, info};
use uuid::Uuid;

use shared_backend::BackendClient;
use shared_models::common::OkResponse;
use shared_models::ApiResult;

use crate::models::{CreateReportRequest, PatientReport, ReportUpload, UpdateReportRequest};

pub struct ReportService {
    backend: BackendClient,
}

impl ReportService {
    pub fn new(backend: &BackendClient) -> Self {
        Self {
            backend: backend.clone(),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<PatientReport>> {
        debug!("Fetching reports");
        self.backend.get("/reports").await
    }

    pub async fn create(&self, request: &CreateReportRequest) -> ApiResult<PatientReport> {
        debug!("Creating report for {}", request.file_url);
        self.backend.post("/reports", request).await
    }

    pub async fn upload(&self, upload: ReportUpload) -> ApiResult<PatientReport> {
        debug!(
            "Uploading report file {} ({} bytes, {})",
            upload.file_name,
            upload.bytes.len(),
            upload.mime_type
        );

        let report: PatientReport = self
            .backend
            .post_multipart("/reports", upload.into_payload())
            .await?;

        info!("Report {} uploaded", report.id);
        Ok(report)
    }

    pub async fn update(
        &self,
        report_id: Uuid,
        request: &UpdateReportRequest,
    ) -> ApiResult<PatientReport> {
        debug!("Updating report: {}", report_id);
        let path = format!("/reports/{}", report_id);
        self.backend.patch(&path, request).await
    }

    pub async fn delete(&self, report_id: Uuid) -> ApiResult<OkResponse> {
        debug!("Deleting report: {}", report_id);
        let path = format!("/reports/{}", report_id);
        self.backend.delete(&path).await
    }
}
