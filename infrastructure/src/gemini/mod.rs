//! Google Gemini adapter for the [`LlmGateway`](leap_application::LlmGateway) port.

mod gateway;
pub mod types;

pub use gateway::GeminiGateway;
