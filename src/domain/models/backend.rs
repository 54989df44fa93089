#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use super::GenerationSettings;
use super::PromptRequest;

pub const MODEL_UNAVAILABLE_TEXT: &str = "Error: Model not available";
pub const GENERATION_ERROR_PREFIX: &str = "Error generating response: ";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// The model id is not configured, or the client never initialized. No
    /// request is made.
    #[error("Model not available")]
    ModelUnavailable,

    #[error("{0}")]
    Unreachable(String),

    #[error("{0}")]
    Timeout(String),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Decode(String),
}

impl InferenceError {
    /// Text stored as the assistant reply when a turn fails.
    pub fn surfaced_text(&self) -> String {
        if *self == InferenceError::ModelUnavailable {
            return MODEL_UNAVAILABLE_TEXT.to_string();
        }

        return format!("{GENERATION_ERROR_PREFIX}{self}");
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            return InferenceError::Timeout(err.to_string());
        }
        if err.is_decode() {
            return InferenceError::Decode(err.to_string());
        }

        return InferenceError::Unreachable(err.to_string());
    }
}

#[async_trait]
pub trait InferenceClient {
    /// Used at startup to verify the backend is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Models installed on the backend, sorted by name.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Requests a full completion for a single prompt. Nothing is streamed, the
    /// call resolves once the backend has produced the entire reply.
    async fn generate(
        &self,
        model_id: &str,
        request: &PromptRequest,
        settings: &GenerationSettings,
    ) -> Result<String, InferenceError>;
}
