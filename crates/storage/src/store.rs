use crate::record::ConsentRecord;
use crate::tier::StorageTier;
use std::sync::Arc;
use tracing::{debug, warn};

/// Layered persistence over the configured tier chain.
///
/// Writes fan out to every available tier so that a read can still find
/// the record after the preferred tier degrades; reads stop at the
/// first tier that yields a valid record.
pub struct LayeredStore {
    key: String,
    tiers: Vec<Arc<dyn StorageTier>>,
}

impl LayeredStore {
    pub fn new(key: impl Into<String>, tiers: Vec<Arc<dyn StorageTier>>) -> Self {
        Self {
            key: key.into(),
            tiers,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Best-effort fan-out write. A failing tier is skipped, never
    /// surfaced; with an in-memory tier in the chain the write always
    /// lands somewhere.
    pub async fn write(&self, record: &ConsentRecord) {
        let payload = record.to_json();
        for tier in &self.tiers {
            if !tier.available().await {
                debug!(tier = tier.name(), "skipping unavailable tier on write");
                continue;
            }
            if let Err(err) = tier.set(&self.key, &payload).await {
                warn!(tier = tier.name(), error = %err, "tier write failed");
            }
        }
    }

    /// First tier that yields a parseable record wins. Malformed
    /// content counts as absent.
    pub async fn read(&self) -> Option<ConsentRecord> {
        for tier in &self.tiers {
            if !tier.available().await {
                debug!(tier = tier.name(), "skipping unavailable tier on read");
                continue;
            }
            let Some(raw) = tier.get(&self.key).await else {
                continue;
            };
            match ConsentRecord::parse(&raw) {
                Some(record) => {
                    debug!(tier = tier.name(), "record found");
                    return Some(record);
                }
                None => debug!(tier = tier.name(), "ignoring malformed record"),
            }
        }
        None
    }
}
