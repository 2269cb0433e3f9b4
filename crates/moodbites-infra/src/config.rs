//! Global configuration loader for MoodBites.
//!
//! Reads `config.toml` from the data directory (`~/.moodbites/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use moodbites_types::config::{GlobalConfig, MIN_REQUEST_TIMEOUT_SECS};

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config,
///   with a zero `request_timeout_secs` raised to [`MIN_REQUEST_TIMEOUT_SECS`].
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(mut config) => {
            if config.assistant.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS {
                tracing::warn!(
                    "request_timeout_secs = {} in {} is too short, using {MIN_REQUEST_TIMEOUT_SECS}",
                    config.assistant.request_timeout_secs,
                    config_path.display()
                );
                config.assistant.request_timeout_secs = MIN_REQUEST_TIMEOUT_SECS;
            }
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Apply command-line overrides on top of the loaded file.
///
/// Blank overrides are ignored so an empty `--language ""` keeps the file value.
pub fn apply_overrides(
    config: &mut GlobalConfig,
    model: Option<&str>,
    language: Option<&str>,
    user_name: Option<&str>,
) {
    if let Some(model) = model.map(str::trim).filter(|m| !m.is_empty()) {
        config.assistant.model = model.to_string();
    }
    if let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) {
        config.assistant.language = language.to_lowercase();
    }
    if let Some(name) = user_name.map(str::trim).filter(|n| !n.is_empty()) {
        config.assistant.user_name = Some(name.to_string());
    }
}
