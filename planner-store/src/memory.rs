//! In-memory backend

use crate::{Collection, Document, DocumentStore, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Keeps every collection in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Document>>,
    activity: Mutex<Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection before handing the store out
    pub fn with_document(mut self, collection: Collection, document: Document) -> Self {
        self.collections.get_mut().insert(collection, document);
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, collection: Collection) -> Result<Document> {
        let collections = self.collections.lock().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn save(&self, collection: Collection, document: &Document) -> Result<()> {
        let mut collections = self.collections.lock().await;
        collections.insert(collection, document.clone());
        Ok(())
    }

    async fn append_activity(&self, entry: &Value) -> Result<()> {
        self.activity.lock().await.push(entry.clone());
        Ok(())
    }

    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<Value>> {
        let activity = self.activity.lock().await;
        let limit = limit.unwrap_or(activity.len());
        Ok(activity.iter().rev().take(limit).cloned().collect())
    }
}
