use crate::tier::{StorageTier, TierError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-process tier; the final guaranteed sink in the chain.
pub struct MemoryTier {
    cells: Mutex<HashMap<String, String>>,
}

impl MemoryTier {
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryTier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageTier for MemoryTier {
    fn name(&self) -> &str {
        "memory"
    }

    async fn available(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.cells.lock().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TierError> {
        self.cells.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
