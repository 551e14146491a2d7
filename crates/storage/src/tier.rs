use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TierError {
    #[error("Tier unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One backing mechanism in the persistence fallback chain.
///
/// Tiers are ordered by durability, most durable first. Availability is
/// probed at most once per process and cached by the implementation.
#[async_trait]
pub trait StorageTier: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the backing store can currently be used.
    async fn available(&self) -> bool;

    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: &str) -> Result<(), TierError>;
}
