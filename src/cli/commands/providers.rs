//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager};
use crate::ui::Style;

/// Prints configured providers to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists all configured providers with their endpoints and models.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;

    if config.providers.is_empty() {
        println!("No providers configured.");
        println!(
            "Add providers to {}",
            Style::secondary(manager.config_path().display())
        );
        return Ok(());
    }

    match specific_provider {
        Some(name) => print_provider_details(&config, name),
        None => {
            print_provider_list(&config);
            Ok(())
        }
    }
}

fn print_provider_details(config: &ConfigFile, name: &str) -> Result<()> {
    let Some(provider) = config.providers.get(name) else {
        anyhow::bail!("Provider '{name}' not found");
    };

    let is_default = config.lingo.provider.as_deref() == Some(name);
    println!(
        "{} {}{}",
        Style::header("Provider:"),
        Style::value(name),
        default_suffix(is_default)
    );
    println!(
        "  {} {}",
        Style::label("endpoint"),
        Style::secondary(&provider.endpoint)
    );
    if provider.api_key_env.is_some() || provider.api_key.is_some() {
        let status = if provider.get_api_key().is_some() {
            Style::success("(set)")
        } else {
            Style::warning("(not set)")
        };
        println!("  {}  {status}", Style::label("api_key"));
    }
    if provider.models.is_empty() {
        println!(
            "  {}   {}",
            Style::label("models"),
            Style::secondary("(none configured)")
        );
    } else {
        println!("  {}", Style::label("models"));
        for model in &provider.models {
            println!("    - {}", Style::value(model));
        }
    }
    Ok(())
}

fn print_provider_list(config: &ConfigFile) {
    let mut names: Vec<_> = config.providers.keys().collect();
    names.sort_unstable();

    println!("{}\n", Style::header("Configured providers"));
    for name in names {
        let provider = &config.providers[name];
        let is_default = config.lingo.provider.as_deref() == Some(name.as_str());
        println!("  {}{}", Style::value(name), default_suffix(is_default));
        println!(
            "    {} {}",
            Style::label("endpoint:"),
            Style::secondary(&provider.endpoint)
        );
        if !provider.models.is_empty() {
            println!(
                "    {} {}",
                Style::label("models:"),
                provider.models.join(", ")
            );
        }
    }
}

fn default_suffix(is_default: bool) -> String {
    if is_default {
        format!(" {}", Style::default_marker())
    } else {
        String::new()
    }
}
