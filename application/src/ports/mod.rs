//! Port definitions (interfaces) for the application layer
//!
//! Ports define the boundaries between the application and external systems.
//! Adapters in the infrastructure and presentation layers implement them.

pub mod generation_logger;
pub mod llm_gateway;
pub mod progress;
pub mod snapshot_repository;
