//! Language-model provider capability consumed by the chat session.

mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Failure of a single provider exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("failed to connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("provider returned an empty response")]
    EmptyResponse,
}

/// Sends one prompt and returns the full text reply.
///
/// Calls may take arbitrarily long; the session never awaits them on its
/// own event path.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn send_message(&self, prompt: &str) -> Result<String, ProviderError>;
}
