pub mod cancel;
pub mod client;
pub mod payload;
pub mod retry;
pub mod session;

pub use cancel::CancelToken;
pub use client::BackendClient;
pub use payload::{FilePart, MultipartPayload, RequestBody};
pub use reqwest::Method;
pub use retry::RetryPolicy;
pub use session::Session;
