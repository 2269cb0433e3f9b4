//! Environment variable credential lookup.
//!
//! The API key is read once at startup from the variable named in
//! `AssistantConfig::api_key_env` and wrapped in a [`SecretString`] so it
//! never reaches `Debug` output or logs.

use secrecy::SecretString;

/// Read an API key from the environment.
///
/// Returns `None` when the variable is unset, blank, or not valid Unicode.
/// Surrounding whitespace is stripped.
pub fn resolve_api_key(var_name: &str) -> Option<SecretString> {
    match std::env::var(var_name) {
        Ok(val) => {
            let trimmed = val.trim();
            if trimmed.is_empty() {
                tracing::debug!(var = var_name, "API key variable is set but blank");
                None
            } else {
                Some(SecretString::from(trimmed.to_string()))
            }
        }
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(var = var_name, "API key variable is not valid Unicode, ignoring");
            None
        }
    }
}
