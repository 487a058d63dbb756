//! XDG-style path utilities for configuration and log files.
//!
//! Paths prefer XDG Base Directory conventions over OS-specific
//! locations so the layout is the same on every Unix.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "lingo";

/// Returns the configuration directory for lingo.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/lingo` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/lingo` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

/// Returns the state directory for lingo (log files live here).
///
/// Resolution order:
/// 1. `$XDG_STATE_HOME/lingo` if `XDG_STATE_HOME` is set
/// 2. `~/.local/state/lingo` otherwise
pub fn state_dir() -> Result<PathBuf> {
    match std::env::var("XDG_STATE_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".local").join("state").join(APP_DIR)),
    }
}

/// Returns the path of the session log file.
pub fn log_file() -> Result<PathBuf> {
    Ok(state_dir()?.join("lingo.log"))
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
