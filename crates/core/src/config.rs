//! Deployment configuration loader.

use consent_guard_policy::PolicyProfile;
use consent_guard_signal::{DEFAULT_RETRY_BUDGET, DEFAULT_RETRY_INTERVAL_MS};
use consent_guard_ui::DEFAULT_TRANSITION_MS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Deployment configuration for the consent controller.
///
/// Every field has a default, so a deployment only states what it
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Logical key for the persisted record; doubles as the cookie name.
    pub storage_key: String,
    /// Grant policy applied on acceptance.
    pub profile: PolicyProfile,
    /// How long the signaling mechanism withholds reporting while
    /// waiting for an update, in milliseconds.
    pub wait_for_update_ms: u64,
    /// Declared duration of the prompt's visual transition.
    pub transition_ms: u64,
    /// Poll interval while waiting for the signaling mechanism.
    pub sink_retry_interval_ms: u64,
    /// Maximum polls before giving up on the mechanism.
    pub sink_retry_budget: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            storage_key: "site_consent".to_string(),
            profile: PolicyProfile::editorial(),
            wait_for_update_ms: 500,
            transition_ms: DEFAULT_TRANSITION_MS,
            sink_retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            sink_retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

impl ControllerConfig {
    /// Load a deployment config from a YAML file.
    ///
    /// # Errors
    /// Returns an error if the file is missing, not valid YAML, or
    /// fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Invalid(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(ConfigError::Invalid("Config file is empty".to_string()));
        }

        let config: ControllerConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid(
                "storage_key must be non-empty".to_string(),
            ));
        }
        if self.profile.id.is_empty() {
            return Err(ConfigError::Invalid(
                "profile id must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}
