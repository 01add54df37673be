//! Generate use case
//!
//! Runs one feature end to end: precheck, prompt, model call, structured parse.

use crate::config::GenerationConfig;
use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use leap_domain::core::string::truncate;
use leap_domain::{
    DomainError, FeatureKind, FeatureRequest, ResponseError, ResponseFormatError, ShapeMismatch,
    StructuredResult, parse_structured,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Maximum characters of raw model text shown in debug logs
const PREVIEW_LEN: usize = 200;

/// Errors that can occur while generating a feature result
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("{}", feature.gateway_error_message())]
    Gateway {
        feature: FeatureKind,
        #[source]
        source: GatewayError,
    },

    #[error(transparent)]
    Format(ResponseFormatError),

    #[error(transparent)]
    ShapeMismatch(ShapeMismatch),

    #[error(transparent)]
    InvalidInput(#[from] DomainError),
}

impl From<ResponseError> for GenerateError {
    fn from(err: ResponseError) -> Self {
        match err {
            ResponseError::Format(e) => GenerateError::Format(e),
            ResponseError::ShapeMismatch(e) => GenerateError::ShapeMismatch(e),
        }
    }
}

impl GenerateError {
    /// Whether sending the same request again could succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GenerateError::InvalidInput(_))
    }
}

/// Use case for running a single LEAP generation feature
pub struct GenerateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    config: GenerationConfig,
    logger: Arc<dyn GenerationLogger>,
}

impl<G: LlmGateway + 'static> GenerateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            config: GenerationConfig::default(),
            logger: Arc::new(NoGenerationLogger),
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute<R: FeatureRequest>(
        &self,
        request: &R,
    ) -> Result<StructuredResult<R::Payload>, GenerateError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress<R: FeatureRequest>(
        &self,
        request: &R,
        progress: &dyn ProgressNotifier,
    ) -> Result<StructuredResult<R::Payload>, GenerateError> {
        let feature = R::KIND;

        if let Some(clarification) = request.precheck()? {
            info!(%feature, "Answered without calling the model");
            return Ok(StructuredResult::Clarification(clarification));
        }

        let generation = GenerationRequest::new(feature, request.prompt(), request.temperature())
            .with_attachments(request.attachments().to_vec());

        info!(
            %feature,
            model = self.gateway.model_name(),
            temperature = generation.temperature,
            attachments = generation.attachments.len(),
            "Sending generation request"
        );
        self.logger.log(GenerationEvent::new(
            "generation_request",
            json!({
                "feature": feature,
                "model": self.gateway.model_name(),
                "temperature": generation.temperature,
                "attachments": generation.attachments.len(),
                "prompt": generation.prompt,
            }),
        ));

        progress.on_request_start(feature);
        let text = match self.gateway.generate(&generation).await {
            Ok(text) => text,
            Err(e) => {
                progress.on_request_complete(feature, false);
                warn!(%feature, error = %e, "Model request failed");
                self.logger.log(GenerationEvent::new(
                    "generation_error",
                    json!({ "feature": feature, "error": e.to_string() }),
                ));
                return Err(GenerateError::Gateway { feature, source: e });
            }
        };
        debug!(%feature, response = %truncate(&text, PREVIEW_LEN), "Received model response");

        let result = parse_structured::<R::Payload>(&text, &self.config.extract);
        progress.on_request_complete(feature, result.is_ok());

        let (outcome, detail) = match &result {
            Ok(StructuredResult::Success(_)) => ("success", None),
            Ok(StructuredResult::Clarification(c)) => ("clarification", Some(c.question.clone())),
            Err(ResponseError::Format(e)) => ("format_error", Some(e.detail().to_string())),
            Err(ResponseError::ShapeMismatch(e)) => ("shape_mismatch", Some(e.detail().to_string())),
        };
        info!(%feature, outcome, "Generation finished");
        self.logger.log(GenerationEvent::new(
            "generation_outcome",
            json!({
                "feature": feature,
                "outcome": outcome,
                "detail": detail,
                "response": text,
            }),
        ));

        Ok(result?)
    }
}
