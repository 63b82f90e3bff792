//! Ops toggle persistence

use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::Toggle;

use super::OpsError;

/// Where the toggle set is kept between restarts
#[async_trait]
pub trait ToggleStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Toggle>, OpsError>;

    /// Replace the stored set with `toggles`
    async fn save(&self, toggles: &[Toggle]) -> Result<(), OpsError>;
}

/// Whole set as one JSON document, replaced atomically via temp file + rename
pub struct JsonFileToggleStore {
    path: PathBuf,
}

impl JsonFileToggleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ops".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ToggleStore for JsonFileToggleStore {
    async fn load(&self) -> Result<Vec<Toggle>, OpsError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&raw).map_err(|e| OpsError::Corrupt(e.to_string()))
    }

    async fn save(&self, toggles: &[Toggle]) -> Result<(), OpsError> {
        let json =
            serde_json::to_vec_pretty(toggles).map_err(|e| OpsError::Corrupt(e.to_string()))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Keeps the set in memory only
#[derive(Default)]
pub struct MemoryToggleStore {
    toggles: Mutex<Vec<Toggle>>,
}

impl MemoryToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toggles(toggles: Vec<Toggle>) -> Self {
        Self {
            toggles: Mutex::new(toggles),
        }
    }

    pub fn snapshot(&self) -> Vec<Toggle> {
        self.toggles.lock().clone()
    }
}

#[async_trait]
impl ToggleStore for MemoryToggleStore {
    async fn load(&self) -> Result<Vec<Toggle>, OpsError> {
        Ok(self.toggles.lock().clone())
    }

    async fn save(&self, toggles: &[Toggle]) -> Result<(), OpsError> {
        *self.toggles.lock() = toggles.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ToggleValue;

    fn toggle(key: &str, on: bool, at: i64) -> Toggle {
        Toggle {
            key: key.into(),
            value: ToggleValue::Switch(on),
            last_updated: at,
            updated_by: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileToggleStore::new(dir.path().join("ops.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("ops.json");
        let store = JsonFileToggleStore::new(&path);

        store
            .save(&[toggle("accept_bookings", false, 10)])
            .await
            .unwrap();
        store
            .save(&[toggle("accept_bookings", true, 20)])
            .await
            .unwrap();

        let loaded = JsonFileToggleStore::new(&path).load().await.unwrap();
        assert_eq!(loaded, vec![toggle("accept_bookings", true, 20)]);
        assert!(!dir.path().join("state").join("ops.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = JsonFileToggleStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, OpsError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryToggleStore::new();
        store.save(&[toggle("ai_replies", false, 5)]).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 1);
        assert_eq!(store.snapshot()[0].key, "ai_replies");
    }
}
