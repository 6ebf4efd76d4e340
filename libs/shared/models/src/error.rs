use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a backend call can surface to the caller.
///
/// Non-2xx responses all land in `Request`; 4xx and 5xx are only told apart
/// by `status`. The display form of `Request` is the message alone so it can
/// be shown to the patient as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Request { status: StatusCode, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Build the error for a non-2xx response, preferring the server's `error` field.
    pub fn from_response(status: StatusCode, body: &serde_json::Value) -> Self {
        let message = body
            .get("error")
            .and_then(|value| value.as_str())
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        ApiError::Request { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport(err) if err.is_timeout())
    }

    /// Only transport failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// The connection was never established, so the server saw nothing.
    pub fn is_connect(&self) -> bool {
        matches!(self, ApiError::Transport(err) if err.is_connect())
    }
}
