//! How the form reaches the analysis endpoint.

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request},
    Router,
};
use thiserror::Error;
use tower::ServiceExt;

use crate::models::analysis::AnalysisRequest;

pub const ANALYZE_PATH: &str = "/api/analyze";
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Response body error: {0}")]
    Body(String),
}

/// Raw status and body of one analysis call. Interpreting the body is the form's job.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait AnalyzeTransport: Send + Sync {
    /// Sends one JSON-encoded `AnalysisRequest`. Exactly one attempt.
    async fn send(&self, request: &AnalysisRequest) -> Result<TransportResponse, TransportError>;
}

/// Dispatches to the API router of this same process.
#[derive(Clone)]
pub struct ApiTransport {
    api: Router,
}

impl ApiTransport {
    pub fn new(api: Router) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AnalyzeTransport for ApiTransport {
    async fn send(&self, request: &AnalysisRequest) -> Result<TransportResponse, TransportError> {
        let http_request = Request::builder()
            .method(Method::POST)
            .uri(ANALYZE_PATH)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(request)?))
            .map_err(|e| TransportError::Body(e.to_string()))?;

        let response = match self.api.clone().oneshot(http_request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let status = response.status().as_u16();
        let body = axum::body::to_bytes(response.into_body(), MAX_RESPONSE_BYTES)
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Posts to a remote analysis endpoint (`ANALYZE_API_URL`).
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: String, timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            url,
        })
    }
}

#[async_trait]
impl AnalyzeTransport for HttpTransport {
    async fn send(&self, request: &AnalysisRequest) -> Result<TransportResponse, TransportError> {
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
