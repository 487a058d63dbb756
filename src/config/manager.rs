use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::paths;
use crate::prompt::validate_language;
use crate::ui::Style;

const DEFAULT_PRIMARY_LANGUAGE: &str = "vi";
const DEFAULT_SECONDARY_LANGUAGE: &str = "en";
const DEFAULT_USER_LABEL: &str = "you";
const DEFAULT_BOT_LABEL: &str = "bot";

/// Default settings in the `[lingo]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LingoConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
    /// Target of the primary translate key (ISO 639-1 code).
    pub primary_language: Option<String>,
    /// Target of the secondary translate key (ISO 639-1 code).
    pub secondary_language: Option<String>,
    /// Language grammar explanations are written in.
    pub explanation_language: Option<String>,
    /// Label shown before the user's messages.
    pub user_label: Option<String>,
    /// Label shown before the model's replies.
    pub bot_label: Option<String>,
    /// Optional system prompt sent ahead of the conversation.
    pub system_prompt: Option<String>,
}

/// Configuration for a chat provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/lingo/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub lingo: LingoConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Configuration after merging CLI arguments, the config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider_name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub primary_language: String,
    pub secondary_language: String,
    pub explanation_language: String,
    pub user_label: String,
    pub bot_label: String,
    pub system_prompt: Option<String>,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub primary_language: Option<String>,
    pub secondary_language: Option<String>,
    pub explanation_language: Option<String>,
}

fn pick(cli: Option<&String>, file: Option<&String>) -> Option<String> {
    cli.or(file).cloned()
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Precedence is CLI, then config file, then built-in defaults.
///
/// # Errors
///
/// Returns an error if provider or model is missing, the provider is not
/// configured, a language code is invalid, or a required API key is absent.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.lingo;

    let provider_name = pick(options.provider.as_ref(), defaults.provider.as_ref())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'provider'\n\n\
                 Please provide it via:\n  \
                 - CLI option: lingo --provider <name>\n  \
                 - Config file: ~/.config/lingo/config.toml"
            )
        })?;

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/lingo/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}",
                available.join("\n  - ")
            )
        }
    })?;

    let model = pick(options.model.as_ref(), defaults.model.as_ref()).ok_or_else(|| {
        anyhow::anyhow!(
            "Missing required configuration: 'model'\n\n\
             Please provide it via:\n  \
             - CLI option: lingo --model <name>\n  \
             - Config file: ~/.config/lingo/config.toml"
        )
    })?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        eprintln!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let primary_language = pick(
        options.primary_language.as_ref(),
        defaults.primary_language.as_ref(),
    )
    .unwrap_or_else(|| DEFAULT_PRIMARY_LANGUAGE.to_string());
    let secondary_language = pick(
        options.secondary_language.as_ref(),
        defaults.secondary_language.as_ref(),
    )
    .unwrap_or_else(|| DEFAULT_SECONDARY_LANGUAGE.to_string());
    let explanation_language = pick(
        options.explanation_language.as_ref(),
        defaults.explanation_language.as_ref(),
    )
    .unwrap_or_else(|| primary_language.clone());

    for lang in [&primary_language, &secondary_language, &explanation_language] {
        validate_language(lang)?;
    }

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/lingo/config.toml"
        );
    }

    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint.clone(),
        model,
        api_key,
        primary_language,
        secondary_language,
        explanation_language,
        user_label: defaults
            .user_label
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_LABEL.to_string()),
        bot_label: defaults
            .bot_label
            .clone()
            .unwrap_or_else(|| DEFAULT_BOT_LABEL.to_string()),
        system_prompt: defaults.system_prompt.clone(),
    })
}

/// Loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for `$XDG_CONFIG_HOME/lingo/config.toml`
    /// (or `~/.config/lingo/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Reads and parses the file; a missing file yields the empty config.
    pub fn load(&self) -> Result<ConfigFile> {
        let contents = match fs::read_to_string(&self.config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ConfigFile::default()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read config file: {}", self.config_path.display())
                });
            }
        };

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(
            manager.config_path(),
            r#"
[lingo]
provider = "ollama"
model = "gemma3:12b"
primary_language = "ja"
user_label = "me"

[providers.ollama]
endpoint = "http://localhost:11434"
models = ["gemma3:12b", "llama3.2"]
"#,
        )
        .unwrap();

        let loaded = manager.load().unwrap();

        assert_eq!(loaded.lingo.provider.as_deref(), Some("ollama"));
        assert_eq!(loaded.lingo.primary_language.as_deref(), Some("ja"));
        assert_eq!(loaded.lingo.user_label.as_deref(), Some("me"));
        assert_eq!(loaded.providers["ollama"].models.len(), 2);
    }

    #[test]
    fn test_load_nonexistent_config_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let loaded = manager.load().unwrap();
        assert!(loaded.providers.is_empty());
        assert!(loaded.lingo.provider.is_none());
    }

    #[test]
    fn test_load_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[lingo\nprovider = ").unwrap();

        let err = manager.load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_provider_get_api_key_from_env() {
        // SAFETY: This test only modifies a test-specific env var
        unsafe {
            std::env::set_var("LINGO_TEST_API_KEY", "test-key-value");
        }

        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("LINGO_TEST_API_KEY".to_string()),
            models: vec![],
        };

        assert_eq!(provider.get_api_key(), Some("test-key-value".to_string()));

        // SAFETY: Cleanup test env var
        unsafe {
            std::env::remove_var("LINGO_TEST_API_KEY");
        }
    }

    #[test]
    fn test_provider_get_api_key_fallback() {
        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("LINGO_TEST_NONEXISTENT_KEY".to_string()),
            models: vec![],
        };

        assert_eq!(provider.get_api_key(), Some("fallback-key".to_string()));
    }

    fn create_test_config() -> ConfigFile {
        let mut providers = HashMap::new();
        providers.insert(
            "ollama".to_string(),
            ProviderConfig {
                endpoint: "http://localhost:11434".to_string(),
                api_key: None,
                api_key_env: None,
                models: vec!["gemma3:12b".to_string()],
            },
        );
        providers.insert(
            "openrouter".to_string(),
            ProviderConfig {
                endpoint: "https://openrouter.ai/api".to_string(),
                api_key: None,
                api_key_env: Some("LINGO_TEST_NONEXISTENT_API_KEY".to_string()),
                models: vec!["gpt-4o".to_string()],
            },
        );

        ConfigFile {
            lingo: LingoConfig {
                provider: Some("ollama".to_string()),
                model: Some("gemma3:12b".to_string()),
                ..LingoConfig::default()
            },
            providers,
        }
    }

    #[test]
    fn test_resolve_config_defaults() {
        let resolved = resolve_config(&ResolveOptions::default(), &create_test_config()).unwrap();

        assert_eq!(resolved.provider_name, "ollama");
        assert_eq!(resolved.endpoint, "http://localhost:11434");
        assert_eq!(resolved.primary_language, "vi");
        assert_eq!(resolved.secondary_language, "en");
        assert_eq!(resolved.explanation_language, "vi");
        assert_eq!(resolved.user_label, "you");
        assert_eq!(resolved.bot_label, "bot");
        assert!(resolved.api_key.is_none());
    }

    #[test]
    fn test_resolve_config_explanation_follows_primary() {
        let options = ResolveOptions {
            primary_language: Some("ja".to_string()),
            ..ResolveOptions::default()
        };
        let resolved = resolve_config(&options, &create_test_config()).unwrap();
        assert_eq!(resolved.explanation_language, "ja");
    }

    #[test]
    fn test_resolve_config_missing_provider() {
        let result = resolve_config(&ResolveOptions::default(), &ConfigFile::default());
        assert!(result.unwrap_err().to_string().contains("provider"));
    }

    #[test]
    fn test_resolve_config_provider_not_found() {
        let options = ResolveOptions {
            provider: Some("nonexistent".to_string()),
            ..ResolveOptions::default()
        };
        let result = resolve_config(&options, &create_test_config());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_resolve_config_missing_model() {
        let mut config = create_test_config();
        config.lingo.model = None;

        let result = resolve_config(&ResolveOptions::default(), &config);
        assert!(result.unwrap_err().to_string().contains("model"));
    }

    #[test]
    fn test_resolve_config_invalid_language() {
        let options = ResolveOptions {
            secondary_language: Some("klingon".to_string()),
            ..ResolveOptions::default()
        };
        let result = resolve_config(&options, &create_test_config());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid language code")
        );
    }

    #[test]
    fn test_resolve_config_api_key_required_but_missing() {
        let options = ResolveOptions {
            provider: Some("openrouter".to_string()),
            model: Some("gpt-4o".to_string()),
            ..ResolveOptions::default()
        };
        let result = resolve_config(&options, &create_test_config());
        assert!(result.unwrap_err().to_string().contains("API key"));
    }
}
