use crate::tier::{StorageTier, TierError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tokio::fs;

const PROBE_FILE: &str = ".consent-probe";

/// Durable tier keeping one JSON file per key under a base directory.
///
/// Availability is checked with a non-destructive write/remove probe
/// the first time it is needed; the result holds for the process.
pub struct FileTier {
    base_path: PathBuf,
    probed: Mutex<Option<bool>>,
}

impl FileTier {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            probed: Mutex::new(None),
        }
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    async fn probe(&self) -> bool {
        let probe_path = self.base_path.join(PROBE_FILE);
        let outcome = async {
            fs::create_dir_all(&self.base_path).await?;
            fs::write(&probe_path, b"probe").await?;
            fs::remove_file(&probe_path).await
        }
        .await;

        match outcome {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    path = %self.base_path.display(),
                    error = %err,
                    "file tier failed availability probe"
                );
                false
            }
        }
    }
}

#[async_trait]
impl StorageTier for FileTier {
    fn name(&self) -> &str {
        "file"
    }

    async fn available(&self) -> bool {
        if let Some(cached) = *self.probed.lock() {
            return cached;
        }
        let result = self.probe().await;
        *self.probed.lock() = Some(result);
        result
    }

    async fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.value_path(key)).await.ok()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TierError> {
        let path = self.value_path(key);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!(key, "file tier stored record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tier = FileTier::new(temp_dir.path());

        tier.set("consent", "{\"choice\":\"accepted\"}").await.unwrap();
        assert_eq!(
            tier.get("consent").await,
            Some("{\"choice\":\"accepted\"}".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tier = FileTier::new(temp_dir.path());
        assert_eq!(tier.get("consent").await, None);
    }

    #[tokio::test]
    async fn test_probe_passes_on_writable_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tier = FileTier::new(temp_dir.path());

        assert!(tier.available().await);
        // Probe file must not linger.
        assert!(!temp_dir.path().join(".consent-probe").exists());
    }

    #[tokio::test]
    async fn test_probe_result_is_cached() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tier = FileTier::new(temp_dir.path().join("consent"));

        assert!(tier.available().await);

        // Removing the directory after the probe does not flip the
        // cached verdict.
        std::fs::remove_dir_all(temp_dir.path().join("consent")).unwrap();
        assert!(tier.available().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_fails_on_read_only_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let mut perms = std::fs::metadata(temp_dir.path()).unwrap().permissions();
        perms.set_mode(0o555);
        std::fs::set_permissions(temp_dir.path(), perms).unwrap();

        let tier = FileTier::new(temp_dir.path());
        assert!(!tier.available().await);
    }
}
