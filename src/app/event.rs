use ratatui::crossterm::event::KeyEvent;
use std::time::Duration;
use tokio::time::Instant;

use crate::error::SessionError;
use crate::grammar::GrammarReport;

/// Identifies one dispatch. Results carry the generation that produced them.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Chat,
    Translate { language: String },
    GrammarCheck,
}

impl RequestKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Translate { .. } => "translate",
            Self::GrammarCheck => "grammar",
        }
    }
}

/// Point in time after which a request is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    pub at: Instant,
    pub after: Duration,
}

impl Deadline {
    pub fn from_now(after: Duration) -> Self {
        Self {
            at: Instant::now() + after,
            after,
        }
    }
}

/// One unit of work handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub generation: Generation,
    pub kind: RequestKind,
    /// Full text sent to the provider, instruction included.
    pub prompt: String,
    /// The user text the prompt was built from.
    pub origin: String,
    pub deadline: Option<Deadline>,
}

/// Everything the controller reacts to, in arrival order.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Resize { width: u16, height: u16 },
    Tick,
    ResponseReady {
        generation: Generation,
        text: String,
    },
    GrammarReady {
        generation: Generation,
        report: GrammarReport,
    },
    RequestFailed {
        generation: Generation,
        error: SessionError,
    },
}

/// Follow-up work the runtime performs on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(PendingRequest),
    StartTicker,
    Quit,
}
