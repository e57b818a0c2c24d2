//! Evolution API client
//!
//! This module provides the HTTP client for the two gateway endpoints the
//! MCP server relays.
//!
//! # Connection Behavior
//!
//! The client uses `reqwest`'s built-in connection pooling and is `Clone`,
//! so one instance is shared by every tool call. It sets no timeout of its
//! own and never retries: each call is exactly one request, and a failed
//! request is reported to the caller as-is.
//!
//! # Authentication
//!
//! Every request carries the configured token in the `apikey` header.
//!
//! # Error Handling
//!
//! Any non-2xx status becomes [`ApiError::Status`] holding the numeric
//! status, its reason phrase and the raw body text. A 2xx body that is not
//! JSON becomes [`ApiError::InvalidResponse`].

use crate::api_key::ApiKey;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::SendTextRequest;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Header the gateway reads the token from
const API_KEY_HEADER: &str = "apikey";

/// Operations the MCP dispatcher needs from the gateway
///
/// [`EvolutionClient`] is the production implementation; the trait lets the
/// dispatcher run against any other backend.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `GET /instance/fetchInstances`
    async fn fetch_instances(&self) -> ApiResult<Value>;

    /// `POST /message/sendText/{instance}`
    async fn send_text(&self, instance: &str, request: &SendTextRequest) -> ApiResult<Value>;
}

/// HTTP client for the Evolution API
#[derive(Clone)]
pub struct EvolutionClient {
    /// Base URL of the gateway
    base_url: Url,
    /// HTTP client
    http: Client,
    /// Token sent in the `apikey` header
    api_key: ApiKey,
}

impl std::fmt::Debug for EvolutionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key)
            .finish()
    }
}

impl EvolutionClient {
    /// Create a client from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` if the underlying HTTP client cannot be
    /// built (for example when no TLS backend is available).
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(format!("evolution-mcp/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http_client(config, http))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(config: &ApiConfig, http: Client) -> Self {
        Self {
            base_url: config.base_url.clone(),
            http,
            api_key: config.api_key.clone(),
        }
    }

    /// Build an endpoint URL by appending path segments to the base URL
    ///
    /// Each segment is percent-encoded, so an instance name can never
    /// escape its own path segment.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a response into JSON, or into a status error for non-2xx codes
    async fn read_json(response: Response) -> ApiResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = status.as_u16(), error = %e, "Failed to read error response body");
                    format!("<unreadable response body: {e}>")
                }
            };
            return Err(ApiError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                body,
            ));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Gateway for EvolutionClient {
    async fn fetch_instances(&self) -> ApiResult<Value> {
        let url = self.endpoint(&["instance", "fetchInstances"])?;

        debug!(url = %url, "Fetching instances");

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, self.api_key.header_value()?)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn send_text(&self, instance: &str, request: &SendTextRequest) -> ApiResult<Value> {
        let url = self.endpoint(&["message", "sendText", instance])?;

        debug!(url = %url, instance = %instance, "Sending text message");

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.api_key.header_value()?)
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }
}
