//! JSON file backend: one file per collection

use crate::{Collection, Document, DocumentStore, Result, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Stores each collection as `<root>/<collection>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory and an empty file for every collection
    ///
    /// This is idempotent - existing files are left untouched.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(root);
        store.ensure_initialized().await?;
        Ok(store)
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to a collection file
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.as_str()))
    }

    /// Path to the activity log
    pub fn activity_path(&self) -> PathBuf {
        self.root.join("activity.jsonl")
    }

    /// Ensure the directory and collection files exist
    pub async fn ensure_initialized(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::io(&self.root, e))?;

        for collection in Collection::ALL {
            let path = self.collection_path(collection);
            if !path.exists() {
                atomic_write(&path, b"{}").await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self, collection: Collection) -> Result<Document> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Document::new());
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        let document: Document = serde_json::from_str(&content)
            .map_err(|source| StoreError::Corrupt { collection, source })?;
        debug!(%collection, records = document.len(), "loaded collection");
        Ok(document)
    }

    async fn save(&self, collection: Collection, document: &Document) -> Result<()> {
        let path = self.collection_path(collection);
        let content = serde_json::to_string_pretty(document)?;
        atomic_write(&path, content.as_bytes()).await?;
        debug!(%collection, records = document.len(), "saved collection");
        Ok(())
    }

    async fn append_activity(&self, entry: &Value) -> Result<()> {
        let path = self.activity_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        file.flush().await.map_err(|e| StoreError::io(&path, e))?;

        Ok(())
    }

    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<Value>> {
        let path = self.activity_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        let mut entries: Vec<Value> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("skipping unreadable activity entry: {}", e);
                    None
                }
            })
            .collect();

        // Newest first
        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)
        .await
        .map_err(|e| StoreError::io(&temp_path, e))?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, JsonFileStore) {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp.path().join("db")).await.unwrap();
        (temp, store)
    }

    #[tokio::test]
    async fn test_open_creates_every_collection_file() {
        let (_temp, store) = setup().await;

        for collection in Collection::ALL {
            let path = store.collection_path(collection);
            assert!(path.exists(), "missing {}", path.display());
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        }
    }

    #[tokio::test]
    async fn test_open_keeps_existing_data() {
        let (temp, store) = setup().await;

        let mut users = Document::new();
        users.insert("user_1".into(), json!({"name": "alice"}));
        store.save(Collection::Users, &users).await.unwrap();

        let reopened = JsonFileStore::open(temp.path().join("db")).await.unwrap();
        let loaded = reopened.load(Collection::Users).await.unwrap();
        assert_eq!(loaded["user_1"]["name"], "alice");
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("nowhere"));
        assert!(store.load(Collection::Tasks).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_preserves_insertion_order() {
        let (_temp, store) = setup().await;

        let mut boards = Document::new();
        for id in ["board_10", "board_2", "board_1"] {
            boards.insert(id.into(), json!({"name": id}));
        }
        store.save(Collection::Boards, &boards).await.unwrap();

        let loaded = store.load(Collection::Boards).await.unwrap();
        let keys: Vec<_> = loaded.keys().cloned().collect();
        assert_eq!(keys, ["board_10", "board_2", "board_1"]);
        assert!(!store.root().join("boards.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let (_temp, store) = setup().await;
        std::fs::write(store.collection_path(Collection::Teams), "[1, 2").unwrap();

        let err = store.load(Collection::Teams).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Corrupt {
                collection: Collection::Teams,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_activity_newest_first_with_limit() {
        let (_temp, store) = setup().await;

        for n in 1..=3 {
            store.append_activity(&json!({"n": n})).await.unwrap();
        }

        let all = store.read_activity(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0]["n"], 3);
        assert_eq!(all[2]["n"], 1);

        let limited = store.read_activity(Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[1]["n"], 2);
    }
}
