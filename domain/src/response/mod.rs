//! Structured response recovery.
//!
//! - [`extract`]: tolerant JSON extraction from raw model text
//! - [`structured`]: success / clarification type guards and classification
//! - [`error`]: format and shape errors

pub mod error;
pub mod extract;
pub mod structured;

pub use error::{ResponseError, ResponseFormatError, ShapeMismatch};
pub use extract::{ExtractOptions, extract_json, extract_json_as, extract_json_with, json_candidate};
pub use structured::{
    Clarification, Discriminant, StructuredPayload, StructuredResult, classify,
    is_clarification_variant, is_success_variant, parse_structured,
};
