//! One-file-per-key store in a local directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use super::KeyValueStore;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the storage directory
    pub async fn open(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to create storage directory {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

/// Escape every byte outside `[A-Za-z0-9_-]` as `%XX`
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key);
        // Write beside the target and rename so readers never see half a value
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", encode_key(key), Uuid::new_v4()));

        fs::write(&tmp, value)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", key, e)))?;

        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(AppError::Storage(format!("Failed to commit {}: {}", key, e)));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Failed to remove {}: {}", key, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("perpustb-file-store-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("@perpustb_users"), "%40perpustb_users");
        assert_eq!(encode_key("a/b"), "a%2Fb");
        assert_ne!(encode_key("@a"), encode_key("_a"));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = scratch_dir();
        let store = FileStore::open(&dir).await.unwrap();
        store.set("@perpustb_users", "[]").await.unwrap();
        drop(store);

        let reopened = FileStore::open(&dir).await.unwrap();
        assert_eq!(
            reopened.get("@perpustb_users").await.unwrap().as_deref(),
            Some("[]")
        );

        reopened.remove("@perpustb_users").await.unwrap();
        assert_eq!(reopened.get("@perpustb_users").await.unwrap(), None);
        reopened.remove("@perpustb_users").await.unwrap();

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let dir = scratch_dir();
        let store = FileStore::open(&dir).await.unwrap();
        store.set("k", "1").await.unwrap();
        store.set("k", "2").await.unwrap();

        let mut entries = fs::read_dir(&dir).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["k.json".to_string()]);

        let _ = fs::remove_dir_all(&dir).await;
    }
}
