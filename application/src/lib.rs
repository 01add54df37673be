//! Application layer for LEAP Studio
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationConfig;
pub use ports::{
    generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger},
    llm_gateway::{GatewayError, GenerationRequest, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    snapshot_repository::{SnapshotRepository, StoreError},
};
pub use use_cases::community::{CommunityError, CommunityService};
pub use use_cases::generate::{GenerateError, GenerateUseCase};
