//! Gemini LLM Gateway implementation

use super::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::config::FileModelConfig;
use async_trait::async_trait;
use leap_application::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

/// LLM Gateway backed by the Gemini REST API
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiGateway {
    /// Build a gateway from the `[model]` config section.
    ///
    /// Fails with [`GatewayError::MissingApiKey`] when no key can be resolved.
    pub fn from_config(config: &FileModelConfig) -> Result<Self, GatewayError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| GatewayError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(
            &config.base_url,
            &config.name,
            api_key,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn new(
        base_url: &str,
        model: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!("GeminiGateway initialized for model {}", model);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Map a non-success status and body to a gateway error.
fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| format!("{} {}", e.error.status, e.error.message).trim().to_string())
        .unwrap_or_else(|_| body.chars().take(200).collect());

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("status {}: {}", status.as_u16(), message)),
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Extract the answer text from a successful response body.
fn parse_body(body: &str) -> Result<String, GatewayError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::Other(format!("Unreadable Gemini response: {e}")))?;
    response.text().ok_or(GatewayError::EmptyResponse)
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let body = GenerateContentRequest::json_turn(
            &request.prompt,
            &request.attachments,
            request.temperature,
        );

        debug!(
            "Sending {} request to {} ({} attachments)",
            request.feature,
            self.model,
            request.attachments.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("Gemini call failed with status {}", status);
            return Err(status_error(status, &text));
        }

        parse_body(&text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
