//! Network synthesis fallback for hosts without a speech engine.
//!
//! The endpoint accepts the request as JSON and answers with the audio
//! payload directly, or with a JSON `{ "error": "..." }` body.

use serde::{Deserialize, Serialize};
use url::Url;

use vocable_core::{AudioBlob, FallbackError, RemoteSynthesizer, Settings, TtsRequest, WAV_MIME};

/// Request timeout for the native client.
#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

// ============================================================================
// Wire format
// ============================================================================

/// Request body; the voice travels by name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FallbackRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pitch: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume: Option<f32>,
}

impl<'a> From<&'a TtsRequest> for FallbackRequest<'a> {
    fn from(request: &'a TtsRequest) -> Self {
        Self {
            text: &request.text,
            voice: request.voice.as_ref().map(|v| v.name.as_str()),
            rate: request.rate,
            pitch: request.pitch,
            volume: request.volume,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for a remote text-to-speech endpoint.
#[derive(Debug, Clone)]
pub struct FallbackClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl FallbackClient {
    /// Create a client for `endpoint` with a default HTTP client.
    pub fn new(endpoint: &str) -> Result<Self, FallbackError> {
        Self::with_client(build_http_client()?, endpoint)
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Result<Self, FallbackError> {
        Ok(Self {
            client,
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    /// Create a client for the configured fallback endpoint.
    pub fn from_settings(settings: &Settings) -> Result<Self, FallbackError> {
        let endpoint = settings
            .fallback_url
            .as_deref()
            .ok_or(FallbackError::NotConfigured)?;
        Self::new(endpoint)
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post(&self, request: &TtsRequest) -> Result<AudioBlob, FallbackError> {
        tracing::info!(
            endpoint = %self.endpoint,
            chars = request.text.len(),
            "Requesting fallback synthesis"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&FallbackRequest::from(request))
            .send()
            .await
            .map_err(|e| FallbackError::Request(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response
            .bytes()
            .await
            .map_err(|e| FallbackError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
            tracing::warn!(status = status.as_u16(), %message, "Fallback synthesis failed");
            return Err(FallbackError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if content_type.as_deref().is_some_and(is_json) {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| "response contained JSON instead of audio".to_string());
            return Err(FallbackError::Rejected(message));
        }

        if body.is_empty() {
            return Err(FallbackError::EmptyPayload);
        }

        let mime = content_type.unwrap_or_else(|| WAV_MIME.to_string());
        tracing::info!(bytes = body.len(), %mime, "Fallback synthesis finished");
        Ok(AudioBlob::new(body.to_vec(), mime))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl RemoteSynthesizer for FallbackClient {
    async fn synthesize(&self, request: &TtsRequest) -> Result<AudioBlob, FallbackError> {
        self.post(request).await
    }
}

// ============================================================================
// Helpers
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> Result<reqwest::Client, FallbackError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| FallbackError::Request(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::unnecessary_wraps)]
fn build_http_client() -> Result<reqwest::Client, FallbackError> {
    Ok(reqwest::Client::new())
}

fn parse_endpoint(raw: &str) -> Result<Url, FallbackError> {
    let url =
        Url::parse(raw).map_err(|e| FallbackError::InvalidEndpoint(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(FallbackError::InvalidEndpoint(raw.to_string()));
    }
    Ok(url)
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
