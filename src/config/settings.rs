//! Analyzer settings persisted as JSON next to the database.
//!
//! The settings are read once at startup and then passed by value into every
//! component that needs them. A missing, empty, or malformed file never aborts a
//! run: the defaults are used and written back so the next run finds a valid file.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    MOBILE_API_KEY_ENV,
};
use crate::error_handling::SettingsError;

/// Static configuration for fetching and checking a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// HTTP User-Agent header value
    pub user_agent: String,
    /// API key for the mobile-friendliness check (check skipped when absent)
    pub mobile_api_key: Option<String>,
    /// Total fetch attempts, initial attempt included
    pub max_retries: u32,
    /// Fixed delay between fetch attempts
    pub retry_delay_seconds: u64,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            mobile_api_key: None,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_seconds: DEFAULT_RETRY_DELAY_SECS,
        }
    }
}

impl AnalyzerSettings {
    /// Loads settings from `path`, falling back to (and persisting) defaults.
    ///
    /// Fields absent from an otherwise valid file take their default values.
    pub fn load_or_init(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                info!("Loaded analyzer settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!(
                    "Settings error ({}): {}. Using default settings.",
                    path.display(),
                    e
                );
                let defaults = Self::default();
                match defaults.save(path) {
                    Ok(()) => info!("Default settings saved to {}", path.display()),
                    Err(save_err) => warn!(
                        "Failed to save default settings to {}: {}",
                        path.display(),
                        save_err
                    ),
                }
                defaults
            }
        }
    }

    /// Reads and parses the settings file.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Io` if the file cannot be read, `SettingsError::Empty`
    /// if it only contains whitespace, and `SettingsError::Parse` for invalid JSON.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(SettingsError::Empty);
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    /// Writes the settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Fills the mobile API key from the environment when the file has none.
    pub fn with_env_overrides(mut self) -> Self {
        if self.mobile_api_key.is_none() {
            if let Ok(key) = std::env::var(MOBILE_API_KEY_ENV) {
                let key = key.trim().to_string();
                if !key.is_empty() {
                    self.mobile_api_key = Some(key);
                }
            }
        }
        self
    }

    /// Number of fetch attempts actually made (never less than one).
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }
}
