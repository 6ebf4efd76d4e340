use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use shared_backend::{FilePart, MultipartPayload};
use shared_models::ApiResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientReport {
    pub id: Uuid,
    pub patient_id: Uuid,
    #[serde(default)]
    pub uploaded_by: Option<Uuid>,
    #[serde(rename = "type", default)]
    pub report_type: Option<String>,
    pub file_url: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// JSON body for `POST /reports` when the file already lives at `file_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Uuid>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReportRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A report file plus its metadata, sent as multipart form data.
#[derive(Debug, Clone)]
pub struct ReportUpload {
    pub patient_id: Option<Uuid>,
    pub report_type: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ReportUpload {
    pub fn from_bytes(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            patient_id: None,
            report_type: None,
            date: None,
            notes: None,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads the file and guesses its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());

        Ok(Self::from_bytes(file_name, mime_for(path), bytes))
    }

    pub fn with_type(mut self, report_type: impl Into<String>) -> Self {
        self.report_type = Some(report_type.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn for_patient(mut self, patient_id: Uuid) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    pub fn into_payload(self) -> MultipartPayload {
        let mut payload = MultipartPayload::new();

        if let Some(patient_id) = self.patient_id {
            payload = payload.text("patient_id", patient_id.to_string());
        }
        if let Some(report_type) = self.report_type {
            payload = payload.text("type", report_type);
        }
        if let Some(date) = self.date {
            payload = payload.text("date", date.format("%Y-%m-%d").to_string());
        }
        if let Some(notes) = self.notes {
            payload = payload.text("notes", notes);
        }

        payload.file(FilePart {
            field: "file".to_string(),
            file_name: self.file_name,
            mime_type: self.mime_type,
            bytes: self.bytes,
        })
    }
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "heic" => "image/heic",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
