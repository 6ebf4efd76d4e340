use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use shared_models::ApiResult;

/// Body of an outgoing request.
///
/// Kept as plain data so a retry can rebuild the transport body; a
/// `reqwest::multipart::Form` can only be sent once.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartPayload),
}

impl RequestBody {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> ApiResult<Self> {
        Ok(RequestBody::Json(serde_json::to_value(body)?))
    }

    /// Multipart bodies let the transport choose the content type and boundary.
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    pub fn to_form(&self) -> ApiResult<Form> {
        let mut form = Form::new();

        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }

        for file in &self.files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime_type)?;
            form = form.part(file.field.clone(), part);
        }

        Ok(form)
    }
}
