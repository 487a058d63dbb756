use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::app::SessionConfig;
use crate::chat::ChatSession;
use crate::clipboard;
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::logging;
use crate::provider::OpenAiProvider;

/// Resolves configuration and runs the interactive session.
///
/// Configuration errors are returned before the terminal is switched to
/// the full-screen view.
pub async fn run_chat(options: ResolveOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load()?;
    let resolved = resolve_config(&options, &config_file)?;

    logging::init_tracing();
    info!(
        provider = %resolved.provider_name,
        model = %resolved.model,
        "Starting chat session"
    );

    let provider = OpenAiProvider::new(
        resolved.endpoint.clone(),
        resolved.model.clone(),
        resolved.api_key.clone(),
    )
    .with_system_prompt(resolved.system_prompt.clone());

    let session = ChatSession::new(
        SessionConfig::from_resolved(&resolved),
        Arc::new(provider),
        clipboard::open(),
    );
    session.run().await
}
