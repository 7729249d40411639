//! The DocumentStore trait

use crate::{Collection, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

/// A whole collection: id -> record, in insertion order
pub type Document = IndexMap<String, Value>;

/// Storage abstraction for planner collections
///
/// Every call works on a whole collection. Callers that need a
/// read-modify-write cycle must serialize it themselves.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Load a collection; a collection that was never saved is empty
    async fn load(&self, collection: Collection) -> Result<Document>;

    /// Replace a collection
    async fn save(&self, collection: Collection, document: &Document) -> Result<()>;

    /// Append one entry to the activity log
    async fn append_activity(&self, entry: &Value) -> Result<()>;

    /// Read activity log entries, newest first
    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<Value>>;
}
