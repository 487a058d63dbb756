//! # lingo - terminal chat with translation and grammar checking
//!
//! `lingo` is a full-screen chat client for OpenAI-compatible endpoints.
//! Besides plain chat it translates the draft (or the clipboard) with one
//! key and checks grammar, copying the result back to the clipboard.
//!
//! ## Keys
//!
//! - `Enter`: send the draft
//! - `Ctrl+S` / `Ctrl+E`: translate to the primary / secondary language
//! - `Ctrl+G`: grammar check
//! - `i`: show the input box again after a reply
//! - `Esc` / `Ctrl+C`: quit
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/lingo/config.toml`:
//!
//! ```toml
//! [lingo]
//! provider = "ollama"
//! model = "gemma3:12b"
//! primary_language = "vi"
//! secondary_language = "en"
//!
//! [providers.ollama]
//! endpoint = "http://localhost:11434"
//! models = ["gemma3:12b", "llama3.2"]
//! ```

/// Session state machine, events and transcript model.
pub mod app;

/// Interactive chat runtime.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// System clipboard access.
pub mod clipboard;

/// Configuration file management and provider settings.
pub mod config;

/// Asynchronous request dispatch and the bounded grammar-check resolver.
pub mod dispatch;

/// Recoverable session errors.
pub mod error;

/// Grammar-check verdict parsing.
pub mod grammar;

/// Log file setup.
pub mod logging;

/// XDG-style path utilities for configuration and logs.
pub mod paths;

/// Prompt templates and supported languages.
pub mod prompt;

/// Language-model providers.
pub mod provider;

/// Terminal UI components (renderer, colors, spinner).
pub mod ui;
