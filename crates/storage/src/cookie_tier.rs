use crate::tier::{StorageTier, TierError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Retention window for the consent cookie: 180 days.
pub const COOKIE_MAX_AGE_SECS: u64 = 180 * 24 * 60 * 60;

/// Raw cookie-line access supplied by the host environment.
#[async_trait]
pub trait CookieSurface: Send + Sync {
    /// Store a full attribute line ("name=value; Max-Age=...; Path=/; SameSite=Lax").
    async fn set(&self, cookie_line: &str) -> Result<(), TierError>;

    /// Fetch the raw, still-encoded value stored under a cookie name.
    async fn get(&self, name: &str) -> Option<String>;
}

/// Cookie-backed tier: additive insurance under the primary store.
///
/// The record is stored URL-encoded with a 180-day retention window,
/// root path scope and a lax cross-site policy. The storage key doubles
/// as the cookie name.
pub struct CookieTier {
    surface: Arc<dyn CookieSurface>,
}

impl CookieTier {
    pub fn new(surface: Arc<dyn CookieSurface>) -> Self {
        Self { surface }
    }

    fn format_line(name: &str, value: &str) -> String {
        format!(
            "{}={}; Max-Age={}; Path=/; SameSite=Lax",
            name,
            urlencoding::encode(value),
            COOKIE_MAX_AGE_SECS
        )
    }
}

#[async_trait]
impl StorageTier for CookieTier {
    fn name(&self) -> &str {
        "cookie"
    }

    async fn available(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> Option<String> {
        let raw = self.surface.get(key).await?;
        match urlencoding::decode(&raw) {
            Ok(value) => Some(value.into_owned()),
            Err(err) => {
                tracing::debug!(error = %err, "cookie value failed to decode");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TierError> {
        self.surface.set(&Self::format_line(key, value)).await
    }
}

/// In-memory surface for hosts without a real cookie store and for tests.
pub struct MemoryCookieSurface {
    jar: Mutex<HashMap<String, String>>,
}

impl MemoryCookieSurface {
    pub fn new() -> Self {
        Self {
            jar: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCookieSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CookieSurface for MemoryCookieSurface {
    async fn set(&self, cookie_line: &str) -> Result<(), TierError> {
        let pair = cookie_line.split(';').next().unwrap_or_default();
        let Some((name, value)) = pair.split_once('=') else {
            return Err(TierError::Unavailable("malformed cookie line".to_string()));
        };
        self.jar.lock().insert(name.trim().to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, name: &str) -> Option<String> {
        self.jar.lock().get(name).cloned()
    }
}
