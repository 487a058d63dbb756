//! Configuration file loading and resolution against CLI overrides.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, LingoConfig, ProviderConfig, ResolveOptions, ResolvedConfig,
    resolve_config,
};
