//! Configuration file loading and validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::BladeConfig;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "blade.toml";

/// Loads and validates `<project_dir>/blade.toml`.
pub fn load_config(project_dir: &Path) -> Result<BladeConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Like [`load_config`], but returns [`BladeConfig::default`] when the
/// project has no `blade.toml`.
pub fn load_config_or_default(project_dir: &Path) -> Result<BladeConfig, ConfigError> {
    if !project_dir.join(CONFIG_FILE).is_file() {
        return Ok(BladeConfig::default());
    }
    load_config(project_dir)
}

/// Parses and validates a `blade.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<BladeConfig, ConfigError> {
    let config: BladeConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &BladeConfig) -> Result<(), ConfigError> {
    if config.views.paths.is_empty() {
        return Err(ConfigError::NoViewPaths);
    }
    if let Some(index) = config.views.paths.iter().position(|p| p.is_empty()) {
        return Err(ConfigError::BlankViewPath { index });
    }
    if config.cache.path.is_empty() {
        return Err(ConfigError::BlankCachePath);
    }
    Ok(())
}
