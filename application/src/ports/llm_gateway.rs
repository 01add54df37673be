//! LLM Gateway port
//!
//! Defines the interface for sending a generation request to the model.

use async_trait::async_trait;
use leap_domain::{Attachment, FeatureKind};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One model call, fully described.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub feature: FeatureKind,
    pub prompt: String,
    pub temperature: f32,
    pub attachments: Vec<Attachment>,
}

impl GenerationRequest {
    pub fn new(feature: FeatureKind, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            feature,
            prompt: prompt.into(),
            temperature,
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer and return the
/// raw text of the model's answer. Interpreting that text is not their job.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the request and return the model's text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;

    /// Model identifier used for logging
    fn model_name(&self) -> &str;
}
