//! File-based tracing setup. The terminal belongs to the chat screen, so
//! logs never go to stdout or stderr.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::paths;

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// filter. Logging is disabled when no log file can be opened.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (log_file, init_warnings) = open_log_file(log_file_candidates());

    if let Some((log_path, file)) = log_file {
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .try_init();

        if installed.is_ok() {
            tracing::info!(path = %log_path.display(), "Logging initialized");
            for warning in init_warnings {
                tracing::warn!("{warning}");
            }
        }
        return;
    }

    let _ = tracing_subscriber::registry().with(env_filter).try_init();
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(path) = paths::log_file() {
        candidates.push(path);
    }
    candidates.push(std::env::temp_dir().join("lingo").join("lingo.log"));
    candidates
}

fn open_log_file(candidates: Vec<PathBuf>) -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => warnings.push(format!(
                "Failed to open log file {}: {e}",
                candidate.display()
            )),
        }
    }

    (None, warnings)
}
