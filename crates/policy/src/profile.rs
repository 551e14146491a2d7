use crate::channels::{Channel, FlagSet};
use crate::decision::Decision;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Named grant policy applied when the visitor accepts.
///
/// Whether acceptance unlocks the advertising channels is a deployment
/// choice, carried here rather than hard-coded in the derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyProfile {
    pub id: String,
    pub accept_grants: Vec<Channel>,
}

impl PolicyProfile {
    /// Editorial deployments: acceptance enables measurement and
    /// personalization storage; advertising channels stay denied.
    pub fn editorial() -> Self {
        Self {
            id: "editorial".to_string(),
            accept_grants: vec![
                Channel::AnalyticsStorage,
                Channel::FunctionalityStorage,
                Channel::PersonalizationStorage,
                Channel::SecurityStorage,
            ],
        }
    }

    /// Advertising deployments additionally unlock the ad channels on
    /// acceptance.
    pub fn advertising() -> Self {
        Self {
            id: "advertising".to_string(),
            accept_grants: vec![
                Channel::AnalyticsStorage,
                Channel::FunctionalityStorage,
                Channel::PersonalizationStorage,
                Channel::SecurityStorage,
                Channel::AdStorage,
                Channel::AdUserData,
                Channel::AdPersonalization,
            ],
        }
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let content = tokio::fs::read_to_string(&path).await?;
        let profile: PolicyProfile = serde_yaml::from_str(&content)?;
        Ok(profile)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ProfileError> {
        let content = serde_yaml::to_string(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Derive the full flag set for a possibly-absent decision.
    ///
    /// Absent and rejected both resolve to the fail-safe baseline;
    /// acceptance grants exactly the profile's channels on top of it.
    pub fn derive_permissions(&self, decision: Option<Decision>) -> FlagSet {
        let mut flags = FlagSet::baseline();
        if decision == Some(Decision::Accepted) {
            for channel in &self.accept_grants {
                flags.grant(*channel);
            }
        }
        flags
    }
}

impl Default for PolicyProfile {
    fn default() -> Self {
        Self::editorial()
    }
}
