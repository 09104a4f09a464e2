//! JSON-file key-value store that survives restarts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use schooladmin_core::error::{AppError, ErrorKind};
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::KeyValueStore;

type Document = BTreeMap<String, String>;

/// Stores every key in one JSON object on disk.
///
/// Each write replaces the whole document through a sibling temp file and a
/// rename, so readers never see a half-written file. On unix the file is
/// owner-only (0600) since it holds the bearer token. Writes from this
/// process are serialized; across processes the last write wins.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Store backed by `path`. The file and its parent directory are created
    /// on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> AppResult<Document> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read session file: {}", self.path.display()),
                    e,
                ));
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Session file is corrupt, starting empty");
                Ok(Document::new())
            }
        }
    }

    async fn write_document(&self, doc: &Document) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        write_private(&tmp, &bytes).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write session file: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace session file: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), keys = doc.len(), "Session file written");
        Ok(())
    }

    async fn update<F>(&self, mutate: F) -> AppResult<()>
    where
        F: FnOnce(&mut Document) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        mutate(&mut doc);
        self.write_document(&doc).await
    }
}

async fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    let mut file = options.open(path).await?;

    // A stale temp file keeps its old mode through `open`.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .await?;
    }

    file.write_all(bytes).await?;
    file.sync_all().await
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.update(|doc| {
            doc.insert(key.to_string(), value.to_string());
        })
        .await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.update(|doc| {
            doc.remove(key);
        })
        .await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        self.update(|doc| {
            for key in keys {
                doc.remove(*key);
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileKeyValueStore::new(&path);
        store.set("token", "abc").await.unwrap();
        store.set("user", "{\"id\":1}").await.unwrap();

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(reopened.get("token").await.unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("user").await.unwrap().as_deref(), Some("{\"id\":1}"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_many_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("session.json"));
        assert_eq!(store.get("token").await.unwrap(), None);
        store.remove("token").await.unwrap();

        store.set("token", "t").await.unwrap();
        store.set("theme", "dark").await.unwrap();
        store.remove_many(&["token", "user"]).await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), None);
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, b"{}").unwrap();
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileKeyValueStore::new(&path);
        store.set("tempPassword", "initial1").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = FileKeyValueStore::new(&path);
        assert_eq!(store.get("token").await.unwrap(), None);
        store.set("token", "fresh").await.unwrap();
        assert_eq!(store.get("token").await.unwrap().as_deref(), Some("fresh"));
    }
}
