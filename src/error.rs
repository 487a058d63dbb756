//! Errors folded into session state instead of ending the session.

use std::time::Duration;
use thiserror::Error;

use crate::grammar::GrammarParseError;
use crate::provider::ProviderError;

/// A recoverable failure shown in the notice row of the chat screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("grammar check timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("could not read grammar result: {0}")]
    GrammarParse(#[from] GrammarParseError),

    #[error("{0}")]
    Validation(String),

    #[error("clipboard unavailable: type the text to use instead")]
    ClipboardUnavailable,
}

impl SessionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
