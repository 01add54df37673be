//! Port for structured generation logging.
//!
//! Defines the [`GenerationLogger`] trait for recording what was asked of the
//! model and how the answer was classified.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures prompts and
//! raw responses in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured generation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The sink adds the timestamp.
pub struct GenerationEvent {
    /// Event type identifier (e.g., "generation_request", "generation_outcome").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl GenerationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging generation events to a structured log.
///
/// `log` is synchronous and infallible; sinks swallow their own write errors.
pub trait GenerationLogger: Send + Sync {
    /// Record a generation event.
    fn log(&self, event: GenerationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoGenerationLogger;

impl GenerationLogger for NoGenerationLogger {
    fn log(&self, _event: GenerationEvent) {}
}
