//! Authenticated JSON client over `reqwest`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::http::types::{ApiError, ApiResult, Operation};
use crate::observability::metrics;
use crate::session::Session;

/// Header carrying the per-request idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// JSON-over-HTTP client bound to one base URL and one session.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    idempotency_keys: bool,
}

impl HttpClient {
    /// Create a client for `base_url` using the timeouts in `settings`.
    pub fn new(base_url: &str, settings: &ApiConfig, session: Arc<Session>) -> ApiResult<Self> {
        url::Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;

        let inner = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(ApiError::Setup)?;

        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            idempotency_keys: settings.idempotency_keys,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// GET `path` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, operation: Operation, path: &str) -> ApiResult<T> {
        let builder = self.request(operation, Method::GET, path);
        self.execute(operation, Method::GET, path, builder).await
    }

    /// POST to `path` with no body.
    pub async fn post<T: DeserializeOwned>(&self, operation: Operation, path: &str) -> ApiResult<T> {
        let builder = self.request(operation, Method::POST, path);
        self.execute(operation, Method::POST, path, builder).await
    }

    /// POST a JSON body to `path`.
    pub async fn post_json<B, T>(&self, operation: Operation, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(operation, Method::POST, path).json(body);
        self.execute(operation, Method::POST, path, builder).await
    }

    /// PUT a JSON body to `path`.
    pub async fn put_json<B, T>(&self, operation: Operation, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(operation, Method::PUT, path).json(body);
        self.execute(operation, Method::PUT, path, builder).await
    }

    fn request(&self, operation: Operation, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .inner
            .request(method, format!("{}{}", self.base_url, path));

        // Absent token: the request goes out unauthenticated.
        if let Some(token) = self.session.token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if self.idempotency_keys && operation.is_mutating() {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, Uuid::new_v4().to_string());
        }

        builder
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ApiResult<T> {
        let started = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| failed(operation, path, started, e))?;

        let status = response.status();
        if !status.is_success() {
            metrics::record_request(operation.name(), "rejected", started.elapsed());
            tracing::warn!(
                operation = operation.name(),
                %method,
                path,
                status = status.as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Request rejected"
            );
            return Err(ApiError::Rejected {
                operation,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| failed(operation, path, started, e))?;

        let parsed = serde_json::from_str(&body).map_err(|e| {
            metrics::record_request(operation.name(), "decode", started.elapsed());
            tracing::warn!(operation = operation.name(), path, error = %e, "Unexpected response body");
            ApiError::Decode {
                operation,
                source: e,
            }
        })?;

        metrics::record_request(operation.name(), "ok", started.elapsed());
        tracing::debug!(
            operation = operation.name(),
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );

        Ok(parsed)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("idempotency_keys", &self.idempotency_keys)
            .finish()
    }
}

/// Classify a send or body-read failure, recording its outcome.
fn failed(operation: Operation, path: &str, started: Instant, e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        metrics::record_request(operation.name(), "timeout", started.elapsed());
        tracing::warn!(operation = operation.name(), path, "Request timed out");
        return ApiError::Timeout { operation };
    }

    metrics::record_request(operation.name(), "transport", started.elapsed());
    tracing::warn!(operation = operation.name(), path, error = %e, "Request failed");
    ApiError::Transport {
        operation,
        source: e,
    }
}
