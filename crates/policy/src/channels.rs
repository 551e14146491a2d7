use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named category of data processing that can be independently
/// granted or denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    AnalyticsStorage,
    FunctionalityStorage,
    PersonalizationStorage,
    SecurityStorage,
    AdStorage,
    AdUserData,
    AdPersonalization,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::AnalyticsStorage,
        Channel::FunctionalityStorage,
        Channel::PersonalizationStorage,
        Channel::SecurityStorage,
        Channel::AdStorage,
        Channel::AdUserData,
        Channel::AdPersonalization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::AnalyticsStorage => "analytics_storage",
            Channel::FunctionalityStorage => "functionality_storage",
            Channel::PersonalizationStorage => "personalization_storage",
            Channel::SecurityStorage => "security_storage",
            Channel::AdStorage => "ad_storage",
            Channel::AdUserData => "ad_user_data",
            Channel::AdPersonalization => "ad_personalization",
        }
    }

    /// Channels required for basic site operation carry no personal
    /// data and are not subject to user choice.
    pub fn strictly_necessary(&self) -> bool {
        matches!(self, Channel::SecurityStorage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grant {
    Granted,
    Denied,
}

impl Grant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grant::Granted => "granted",
            Grant::Denied => "denied",
        }
    }
}

/// Mapping from every permission channel to its grant state.
///
/// Always derived from a decision (or its absence), never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    grants: BTreeMap<Channel, Grant>,
}

impl FlagSet {
    /// Fail-safe baseline: every channel denied apart from the
    /// strictly-necessary ones.
    pub fn baseline() -> Self {
        let mut grants = BTreeMap::new();
        for channel in Channel::ALL {
            let grant = if channel.strictly_necessary() {
                Grant::Granted
            } else {
                Grant::Denied
            };
            grants.insert(channel, grant);
        }
        Self { grants }
    }

    pub fn grant(&mut self, channel: Channel) {
        self.grants.insert(channel, Grant::Granted);
    }

    pub fn get(&self, channel: Channel) -> Grant {
        self.grants.get(&channel).copied().unwrap_or(Grant::Denied)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, Grant)> + '_ {
        self.grants.iter().map(|(channel, grant)| (*channel, *grant))
    }

    /// Flat wire mapping, channel name to "granted"/"denied".
    pub fn to_params(&self) -> serde_json::Map<String, serde_json::Value> {
        self.grants
            .iter()
            .map(|(channel, grant)| {
                (
                    channel.as_str().to_string(),
                    serde_json::Value::String(grant.as_str().to_string()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_denies_everything_but_security() {
        let flags = FlagSet::baseline();
        for channel in Channel::ALL {
            let expected = if channel.strictly_necessary() {
                Grant::Granted
            } else {
                Grant::Denied
            };
            assert_eq!(flags.get(channel), expected, "{}", channel.as_str());
        }
    }

    #[test]
    fn test_grant_overrides_baseline() {
        let mut flags = FlagSet::baseline();
        flags.grant(Channel::AnalyticsStorage);
        assert_eq!(flags.get(Channel::AnalyticsStorage), Grant::Granted);
        assert_eq!(flags.get(Channel::AdStorage), Grant::Denied);
    }

    #[test]
    fn test_to_params_uses_wire_names() {
        let flags = FlagSet::baseline();
        let params = flags.to_params();
        assert_eq!(params.len(), Channel::ALL.len());
        assert_eq!(params["analytics_storage"], "denied");
        assert_eq!(params["security_storage"], "granted");
    }

    #[test]
    fn test_channel_serde_names_match_wire_names() {
        for channel in Channel::ALL {
            let json = serde_json::to_string(&channel).unwrap();
            assert_eq!(json, format!("\"{}\"", channel.as_str()));
        }
    }
}
