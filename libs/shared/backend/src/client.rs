use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::{ApiError, ApiResult};

use crate::cancel::CancelToken;
use crate::payload::{MultipartPayload, RequestBody};
use crate::retry::RetryPolicy;
use crate::session::Session;

/// Handle on the companion backend.
///
/// Clones share one `Session`, so a login performed through any clone is
/// seen by all of them. `with_token` starts a separate session instead.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    session: Arc<RwLock<Session>>,
    retry: RetryPolicy,
    cancel: Option<CancelToken>,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session: Arc::new(RwLock::new(Session::anonymous())),
            retry: RetryPolicy::from_config(config),
            cancel: None,
        })
    }

    /// A handle with its own session holding `token`. The transport is shared.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::authenticated(token))),
            ..self.clone()
        }
    }

    /// A handle sharing this session whose requests abort once `cancel` fires.
    pub fn with_cancellation(&self, cancel: CancelToken) -> Self {
        Self {
            cancel: Some(cancel),
            ..self.clone()
        }
    }

    pub fn with_retry_policy(&self, retry: RetryPolicy) -> Self {
        Self {
            retry,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        self.session.write().await.set(token);
    }

    pub async fn clear_token(&self) {
        self.session.write().await.clear();
    }

    pub async fn token(&self) -> Option<String> {
        self.session.read().await.token().map(str::to_string)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    async fn get_headers(&self, body: &RequestBody) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        if !body.is_multipart() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if let Some(token) = self.session.read().await.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// The request primitive. Returns the response body as parsed JSON;
    /// a body that is empty or not JSON comes back as `{}`.
    pub async fn request_value(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> ApiResult<Value> {
        let mut attempt = 1;

        loop {
            let outcome = match &self.cancel {
                Some(cancel) if cancel.is_cancelled() => return Err(ApiError::Cancelled),
                Some(cancel) => {
                    tokio::select! {
                        _ = cancel.cancelled() => Err(ApiError::Cancelled),
                        result = self.send_once(method.clone(), path, &body) => result,
                    }
                }
                None => self.send_once(method.clone(), path, &body).await,
            };

            match outcome {
                Err(err) if self.retry.should_retry(attempt, &method, &err) => {
                    let delay = self.retry.jittered_backoff(attempt);
                    warn!(
                        "Request {} {} failed (attempt {}/{}): {}; retrying in {:?}",
                        method, path, attempt, self.retry.max_attempts, err, delay
                    );
                    self.pause(delay).await?;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn pause(&self, delay: Duration) -> ApiResult<()> {
        match &self.cancel {
            Some(cancel) => {
                tokio::select! {
                    _ = cancel.cancelled() => Err(ApiError::Cancelled),
                    _ = tokio::time::sleep(delay) => Ok(()),
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }

    async fn send_once(&self, method: Method, path: &str, body: &RequestBody) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let headers = self.get_headers(body).await?;
        let req = self.client.request(method, &url).headers(headers);

        let req = match body {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.body(serde_json::to_vec(value)?),
            RequestBody::Multipart(payload) => req.multipart(payload.to_form()?),
        };

        let response = req.send().await?;

        let status = response.status();
        let text = response.text().await?;
        let data = parse_body(&text);

        if !status.is_success() {
            error!("API error ({}): {}", status, text);
            return Err(ApiError::from_response(status, &data));
        }

        Ok(data)
    }

    /// Request primitive followed by schema-checked decoding into `T`.
    pub async fn request<T>(&self, method: Method, path: &str, body: RequestBody) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let value = self.request_value(method, path, body).await?;
        decode(value)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, RequestBody::Empty).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, RequestBody::json(body)?).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, RequestBody::json(body)?).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, RequestBody::json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::DELETE, path, RequestBody::Empty).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: MultipartPayload,
    ) -> ApiResult<T> {
        self.request(Method::POST, path, RequestBody::Multipart(payload)).await
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }

    serde_json::from_str(text).unwrap_or_else(|e| {
        warn!("Response body is not valid JSON ({}), treating it as empty", e);
        Value::Object(Map::new())
    })
}

pub fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
