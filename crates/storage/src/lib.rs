pub mod cookie_tier;
pub mod file_tier;
pub mod memory_tier;
pub mod record;
pub mod store;
pub mod tier;

pub use cookie_tier::{CookieSurface, CookieTier, MemoryCookieSurface, COOKIE_MAX_AGE_SECS};
pub use file_tier::FileTier;
pub use memory_tier::MemoryTier;
pub use record::{ConsentRecord, SCHEMA_VERSION};
pub use store::LayeredStore;
pub use tier::{StorageTier, TierError};
