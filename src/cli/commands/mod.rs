//! Subcommand implementations.

/// Interactive session launcher.
pub mod chat;

/// Provider listing command handler.
pub mod providers;
