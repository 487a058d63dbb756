use ratatui::style::Style as TuiStyle;
use ratatui::widgets::{Block, Borders};
use std::time::Duration;
use tui_textarea::TextArea;

use super::event::{Generation, RequestKind};
use super::transcript::Transcript;
use super::viewport::Viewport;
use crate::config::ResolvedConfig;
use crate::error::SessionError;
use crate::prompt::language_name;

/// Most characters the draft may hold, newlines included.
pub const INPUT_CHAR_LIMIT: usize = 280;

/// Where the session is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Accepting keystrokes. The input box may be collapsed until typed into.
    Composing,
    /// A request is outstanding and the busy indicator animates.
    Awaiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    /// Builds a language from its code, falling back to the code as the name.
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: language_name(code).unwrap_or(code).to_string(),
        }
    }
}

/// Configuration for a chat session, fixed at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Label prefixed to the user's lines.
    pub user_label: String,
    /// Label prefixed to the provider's lines.
    pub bot_label: String,
    /// Target of Ctrl+S.
    pub primary: Language,
    /// Target of Ctrl+E.
    pub secondary: Language,
    /// Language grammar explanations are written in.
    pub explanation: Language,
    /// Ceiling for a grammar check, provider call included.
    pub grammar_timeout: Duration,
}

impl SessionConfig {
    pub fn from_resolved(resolved: &ResolvedConfig) -> Self {
        Self {
            user_label: resolved.user_label.clone(),
            bot_label: resolved.bot_label.clone(),
            primary: Language::from_code(&resolved.primary_language),
            secondary: Language::from_code(&resolved.secondary_language),
            explanation: Language::from_code(&resolved.explanation_language),
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_label: "you".to_string(),
            bot_label: "bot".to_string(),
            primary: Language::from_code("vi"),
            secondary: Language::from_code("en"),
            explanation: Language::from_code("vi"),
            grammar_timeout: crate::dispatch::GRAMMAR_CHECK_TIMEOUT,
        }
    }
}

/// All mutable state of a running session. Only the controller writes it.
#[derive(Debug)]
pub struct Session {
    pub(crate) config: SessionConfig,
    pub(crate) transcript: Transcript,
    pub(crate) input: TextArea<'static>,
    pub(crate) mode: Mode,
    pub(crate) input_visible: bool,
    pub(crate) last_error: Option<SessionError>,
    pub(crate) spinner_phase: usize,
    pub(crate) viewport: Viewport,
    /// Set by the first resize; nothing but a placeholder is drawn before.
    pub(crate) ready: bool,
    pub(crate) terminal_size: (u16, u16),
    pub(crate) generation: Generation,
    pub(crate) in_flight: Option<(Generation, RequestKind)>,
    pub(crate) dropped_events: u64,
    pub(crate) running: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            transcript: Transcript::default(),
            input: new_input(),
            mode: Mode::Composing,
            input_visible: true,
            last_error: None,
            spinner_phase: 0,
            viewport: Viewport::new(0, 0),
            ready: false,
            terminal_size: (0, 0),
            generation: 0,
            in_flight: None,
            dropped_events: 0,
            running: true,
        }
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub const fn input(&self) -> &TextArea<'static> {
        &self.input
    }

    /// Current draft, lines joined with `\n`.
    pub fn draft(&self) -> String {
        self.input.lines().join("\n")
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn is_awaiting(&self) -> bool {
        matches!(self.mode, Mode::Awaiting)
    }

    /// The input box accepts keystrokes exactly while composing, drawn or not.
    pub const fn input_interactable(&self) -> bool {
        matches!(self.mode, Mode::Composing)
    }

    /// Whether the input box is drawn. Rendering only.
    pub const fn input_visible(&self) -> bool {
        self.input_visible
    }

    pub const fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub const fn spinner_phase(&self) -> usize {
        self.spinner_phase
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    pub const fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub const fn generation(&self) -> Generation {
        self.generation
    }

    pub const fn in_flight(&self) -> Option<&(Generation, RequestKind)> {
        self.in_flight.as_ref()
    }

    /// Results and events that arrived for an abandoned request or after quit.
    pub const fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }
}

/// A fresh, empty input box.
pub fn new_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_block(Block::default().borders(Borders::ALL));
    input.set_cursor_line_style(TuiStyle::default());
    input.set_placeholder_text("Type a message...");
    input
}
