//! Configuration loader for Chatlens.
//!
//! Reads `chatlens.toml` and deserializes it into [`ChatlensConfig`], then
//! applies environment overrides. The completion credential is resolved
//! separately from the environment and kept as a [`SecretString`].

use std::path::Path;

use secrecy::SecretString;

use chatlens_types::config::{ChatlensConfig, CompletionConfig};
use chatlens_types::error::ConfigError;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "chatlens.toml";

pub const ENV_ENDPOINT_BASE: &str = "CHATLENS_ENDPOINT_BASE";
pub const ENV_MODEL: &str = "CHATLENS_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "CHATLENS_TIMEOUT_SECS";

/// Load configuration and apply environment overrides.
///
/// - `Some(path)`: the file must exist and parse, otherwise [`ConfigError`].
/// - `None`: `chatlens.toml` in the working directory is used if present; a
///   missing or broken implicit file logs and falls back to defaults.
pub async fn load_config(path: Option<&Path>) -> Result<ChatlensConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path).await?,
        None => {
            let implicit = Path::new(DEFAULT_CONFIG_FILE);
            match tokio::fs::try_exists(implicit).await {
                Ok(true) => match read_config_file(implicit).await {
                    Ok(config) => config,
                    Err(err) => {
                        tracing::warn!("{err}, using defaults");
                        ChatlensConfig::default()
                    }
                },
                _ => {
                    tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    ChatlensConfig::default()
                }
            }
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

async fn read_config_file(path: &Path) -> Result<ChatlensConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let config = toml::from_str::<ChatlensConfig>(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Apply `CHATLENS_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut ChatlensConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base) = lookup(ENV_ENDPOINT_BASE) {
        config.completion.endpoint_base = base;
    }

    if let Some(model) = lookup(ENV_MODEL) {
        config.completion.model_id = model;
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS.to_string(),
                reason: e.to_string(),
            })?;
        config.completion.timeout_secs = secs;
    }

    Ok(())
}

/// Read the completion credential from the variable named by `api_key_env`.
///
/// Returns `None` when the variable is unset or empty.
pub fn resolve_api_key<F>(config: &CompletionConfig, lookup: F) -> Option<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&config.api_key_env)
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}
