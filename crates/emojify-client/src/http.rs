use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use emojify_types::{
    EmojiRequest, EmojiResponse, EmojifyError, Result, GENERIC_SERVICE_MESSAGE,
};

use crate::{ClientConfig, EmojiService};

// ---------------------------------------------------------------------------
// HttpEmojiService
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HttpEmojiService {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpEmojiService {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmojifyError::Other(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
            timeout: config.timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> EmojifyError {
        if e.is_timeout() {
            EmojifyError::Network(format!("request timed out after {:?}", self.timeout))
        } else {
            EmojifyError::Network(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Response translation
// ---------------------------------------------------------------------------

/// Every body, success or not, must be JSON. A body that is not is a
/// malformed payload regardless of status.
fn parse_body(body: &str) -> Result<EmojiResponse> {
    serde_json::from_str(body)
        .map_err(|e| EmojifyError::Network(format!("Failed to parse response JSON: {e}")))
}

fn translate(status: reqwest::StatusCode, parsed: EmojiResponse) -> Result<String> {
    if !status.is_success() {
        return Err(map_error(status, parsed));
    }
    parsed
        .emojis
        .ok_or_else(|| EmojifyError::Network("Response is missing the 'emojis' field".into()))
}

fn map_error(status: reqwest::StatusCode, parsed: EmojiResponse) -> EmojifyError {
    let message = parsed
        .emojis
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_SERVICE_MESSAGE.to_string());
    EmojifyError::Service {
        status: status.as_u16(),
        message,
    }
}

// ---------------------------------------------------------------------------
// EmojiService implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl EmojiService for HttpEmojiService {
    async fn generate(&self, request: &EmojiRequest) -> Result<String> {
        info!(
            endpoint = %self.endpoint,
            prompt_chars = request.prompt.chars().count(),
            num_of_emojis = request.num_of_emojis,
            "emoji request"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        let result = parse_body(&body).and_then(|parsed| translate(status, parsed));
        match &result {
            Ok(emojis) => info!(
                status = status.as_u16(),
                chars = emojis.chars().count(),
                "emoji response"
            ),
            Err(err) => warn!(status = status.as_u16(), error = %err, "emoji request failed"),
        }
        result
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
