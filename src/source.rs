use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::api::ApiEnvelope;
use crate::config::ShowroomConfig;

/// Anything that can answer a content endpoint with an [`ApiEnvelope`].
///
/// `endpoint` is relative to the API base, e.g. `products/42` or `news?page=2`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> Result<ApiEnvelope>;
}

/// Percent-encode a single path segment taken from user input.
pub fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Content source backed by the REST API.
pub struct HttpContentSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpContentSource {
    pub fn new(config: &ShowroomConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .context("building http client")?;
        Ok(Self { client, base: config.api_base()? })
    }

    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base
            .join(endpoint.trim_start_matches('/'))
            .with_context(|| format!("invalid endpoint: {endpoint}"))
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, endpoint: &str) -> Result<ApiEnvelope> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "fetching content");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request failed: {url}"))?;
        let status = resp.status();
        // error responses may or may not carry an envelope
        let envelope = match resp.json::<ApiEnvelope>().await {
            Ok(env) if status.is_success() => env,
            Err(e) if status.is_success() => {
                return Err(e).with_context(|| format!("decoding response from {url}"));
            }
            Ok(env) => with_status(env.message, status, &url),
            Err(_) => with_status(None, status, &url),
        };
        if !envelope.success {
            warn!(%url, %status, message = envelope.message.as_deref().unwrap_or(""), "backend reported failure");
        }
        Ok(envelope)
    }
}

/// Failure envelope for a non-2xx response, keeping any backend message.
fn with_status(message: Option<String>, status: StatusCode, url: &Url) -> ApiEnvelope {
    match message.filter(|m| !m.trim().is_empty()) {
        Some(m) => ApiEnvelope::failure(format!("{m} ({status} from {url})")),
        None => ApiEnvelope::failure(format!("backend returned {status} for {url}")),
    }
}
