#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

use lingo_chat::app::SessionConfig;
use lingo_chat::config::{ConfigFile, LingoConfig, ProviderConfig, ResolveOptions, resolve_config};
use std::collections::HashMap;

fn provider(endpoint: &str, models: &[&str]) -> ProviderConfig {
    ProviderConfig {
        endpoint: endpoint.to_string(),
        api_key: Some("test_key".to_string()),
        api_key_env: None,
        models: models.iter().map(ToString::to_string).collect(),
    }
}

fn make_config_with_defaults() -> ConfigFile {
    let mut providers = HashMap::new();
    providers.insert(
        "test_provider".to_string(),
        provider("http://test.local", &["config_model"]),
    );
    providers.insert(
        "other_provider".to_string(),
        provider("http://other.local", &["cli_model"]),
    );

    ConfigFile {
        lingo: LingoConfig {
            provider: Some("test_provider".to_string()),
            model: Some("config_model".to_string()),
            primary_language: Some("ja".to_string()),
            secondary_language: Some("fr".to_string()),
            explanation_language: None,
            user_label: Some("me".to_string()),
            bot_label: None,
            system_prompt: Some("Answer briefly.".to_string()),
        },
        providers,
    }
}

#[test]
fn test_config_values_used_without_cli() {
    let config = make_config_with_defaults();
    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.provider_name, "test_provider");
    assert_eq!(resolved.endpoint, "http://test.local");
    assert_eq!(resolved.model, "config_model");
    assert_eq!(resolved.primary_language, "ja");
    assert_eq!(resolved.secondary_language, "fr");
    assert_eq!(resolved.system_prompt.as_deref(), Some("Answer briefly."));
}

#[test]
fn test_cli_provider_and_model_override_config() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        provider: Some("other_provider".to_string()),
        model: Some("cli_model".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();
    assert_eq!(resolved.provider_name, "other_provider");
    assert_eq!(resolved.endpoint, "http://other.local");
    assert_eq!(resolved.model, "cli_model");
}

#[test]
fn test_cli_languages_override_config() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        primary_language: Some("vi".to_string()),
        secondary_language: Some("en".to_string()),
        explanation_language: Some("de".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();
    assert_eq!(resolved.primary_language, "vi");
    assert_eq!(resolved.secondary_language, "en");
    assert_eq!(resolved.explanation_language, "de");
}

#[test]
fn test_builtin_defaults_fill_gaps() {
    let mut config = make_config_with_defaults();
    config.lingo.primary_language = None;
    config.lingo.secondary_language = None;
    config.lingo.user_label = None;

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
    assert_eq!(resolved.primary_language, "vi");
    assert_eq!(resolved.secondary_language, "en");
    assert_eq!(resolved.explanation_language, "vi");
    assert_eq!(resolved.user_label, "you");
    assert_eq!(resolved.bot_label, "bot");
}

#[test]
fn test_explanation_language_follows_primary() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        primary_language: Some("ko".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();
    assert_eq!(resolved.explanation_language, "ko");
}

#[test]
fn test_invalid_config_language_is_an_error() {
    let mut config = make_config_with_defaults();
    config.lingo.secondary_language = Some("klingon".to_string());

    let err = resolve_config(&ResolveOptions::default(), &config).unwrap_err();
    assert!(err.to_string().contains("Invalid language code: 'klingon'"));
}

#[test]
fn test_session_config_carries_resolved_values() {
    let config = make_config_with_defaults();
    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
    let session = SessionConfig::from_resolved(&resolved);

    assert_eq!(session.user_label, "me");
    assert_eq!(session.bot_label, "bot");
    assert_eq!(session.primary.code, "ja");
    assert_eq!(session.primary.name, "Japanese");
    assert_eq!(session.secondary.name, "French");
    assert_eq!(session.explanation.code, "ja");
}
