//! Domain layer for LEAP Studio
//!
//! This crate contains the entities, value objects and pure logic of the
//! platform. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Structured responses
//!
//! Every generation feature asks the model for JSON and gets back free text.
//! [`response`] recovers the JSON from that text and classifies it as either
//! the feature's success payload or a [`Clarification`] request:
//!
//! - **Extraction**: fenced block, else the outermost bracket span
//! - **Classification**: `kind` tag if present, else a success-only field
//!
//! ## Features
//!
//! Each tool (Project Builder, Pitch Generator, ...) is a [`FeatureRequest`]
//! that renders its own prompt and names the payload it expects.
//!
//! ## Community
//!
//! Members, startups, posts and messages, persisted as one
//! [`CommunitySnapshot`].

pub mod community;
pub mod config;
pub mod core;
pub mod feature;
pub mod prompt;
pub mod response;

// Re-export commonly used types
pub use community::{
    ChatMessage, Comment, CommunitySnapshot, FounderLogEntry, NewUser, Post, ProblemSolverSession,
    ProfileUpdate, StartupMetrics, StartupProfile, User,
};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use feature::{Attachment, FeatureKind, FeatureRequest};
pub use prompt::PromptTemplate;
pub use response::{
    Clarification, Discriminant, ExtractOptions, ResponseError, ResponseFormatError,
    ShapeMismatch, StructuredPayload, StructuredResult, classify, extract_json, extract_json_as,
    parse_structured,
};
