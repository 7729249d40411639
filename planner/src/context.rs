//! PlannerContext - I/O primitives for planner storage
//!
//! The context provides typed access to the collections and a write lock per
//! collection. No business logic methods, just data access primitives.
//! Operations do all the work.

use crate::error::{PlannerError, Result};
use crate::types::{
    Board, BoardId, EntityId, Record, Task, TaskId, Team, TeamId, TeamSummary, User, UserId,
};
use indexmap::{IndexMap, IndexSet};
use planner_config::PlannerConfig;
use planner_operations::LogEntry;
use planner_store::{Collection, Document, DocumentStore, JsonFileStore, MemoryStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Team id -> member ids
pub type MembersByTeam = IndexMap<TeamId, IndexSet<UserId>>;

/// User id -> summaries of the teams the user belongs to
pub type TeamsByUser = IndexMap<UserId, Vec<TeamSummary>>;

/// Context passed to every operation - provides access, not logic
#[derive(Debug)]
pub struct PlannerContext {
    store: Arc<dyn DocumentStore>,
    /// Where exported reports are written
    out_dir: PathBuf,
    /// One lock per collection, indexed by `Collection::index`
    locks: Vec<Mutex<()>>,
}

/// Held write locks; released on drop
pub struct CollectionLock<'a> {
    _guards: Vec<MutexGuard<'a, ()>>,
}

impl PlannerContext {
    /// Create a context over any store
    pub fn new(store: Arc<dyn DocumentStore>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            out_dir: out_dir.into(),
            locks: Collection::ALL.iter().map(|_| Mutex::new(())).collect(),
        }
    }

    /// Create a context backed by an in-memory store
    pub fn in_memory(out_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(MemoryStore::new()), out_dir)
    }

    /// Open the JSON file store named by the configuration
    pub async fn open(config: &PlannerConfig) -> Result<Self> {
        let store = JsonFileStore::open(&config.db_dir).await?;
        debug!(db_dir = %config.db_dir.display(), "opened document store");
        Ok(Self::new(Arc::new(store), &config.out_dir))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Take the write locks for a set of collections
    ///
    /// Locks are always acquired in `Collection::ALL` order regardless of the
    /// order given, so two operations can never wait on each other.
    pub async fn lock(&self, collections: &[Collection]) -> CollectionLock<'_> {
        let mut wanted: Vec<Collection> = collections.to_vec();
        wanted.sort();
        wanted.dedup();

        let mut guards = Vec::with_capacity(wanted.len());
        for collection in wanted {
            guards.push(self.locks[collection.index()].lock().await);
        }
        CollectionLock { _guards: guards }
    }

    // =========================================================================
    // Generic collection I/O
    // =========================================================================

    /// Load a collection as a typed map
    async fn read_map<K, V>(&self, collection: Collection) -> Result<IndexMap<K, V>>
    where
        K: EntityId,
        V: DeserializeOwned,
    {
        let document = self.store.load(collection).await?;
        document
            .into_iter()
            .map(|(key, value)| -> Result<(K, V)> {
                let value = serde_json::from_value(value)
                    .map_err(|source| StoreError::Corrupt { collection, source })?;
                Ok((K::from_string(key), value))
            })
            .collect()
    }

    /// Save a typed map as a collection
    async fn write_map<K, V>(&self, collection: Collection, map: &IndexMap<K, V>) -> Result<()>
    where
        K: EntityId,
        V: Serialize,
    {
        let mut document = Document::with_capacity(map.len());
        for (key, value) in map {
            document.insert(key.as_str().to_string(), serde_json::to_value(value)?);
        }
        self.store.save(collection, &document).await?;
        Ok(())
    }

    /// Load a record collection, restoring each record's id from its key
    async fn read_records<R: Record>(&self, collection: Collection) -> Result<IndexMap<R::Id, R>> {
        let mut records: IndexMap<R::Id, R> = self.read_map(collection).await?;
        for (id, record) in records.iter_mut() {
            record.set_id(id.clone());
        }
        Ok(records)
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn read_users(&self) -> Result<IndexMap<UserId, User>> {
        self.read_records(Collection::Users).await
    }

    pub async fn write_users(&self, users: &IndexMap<UserId, User>) -> Result<()> {
        self.write_map(Collection::Users, users).await
    }

    /// Read one user, failing with `UserNotFound`
    pub async fn read_user(&self, id: &UserId) -> Result<User> {
        self.read_users()
            .await?
            .shift_remove(id)
            .ok_or_else(|| PlannerError::UserNotFound { id: id.to_string() })
    }

    pub async fn read_user_teams(&self) -> Result<TeamsByUser> {
        self.read_map(Collection::UserTeams).await
    }

    pub async fn write_user_teams(&self, user_teams: &TeamsByUser) -> Result<()> {
        self.write_map(Collection::UserTeams, user_teams).await
    }

    // =========================================================================
    // Teams
    // =========================================================================

    pub async fn read_teams(&self) -> Result<IndexMap<TeamId, Team>> {
        self.read_records(Collection::Teams).await
    }

    pub async fn write_teams(&self, teams: &IndexMap<TeamId, Team>) -> Result<()> {
        self.write_map(Collection::Teams, teams).await
    }

    /// Read one team, failing with `TeamNotFound`
    pub async fn read_team(&self, id: &TeamId) -> Result<Team> {
        self.read_teams()
            .await?
            .shift_remove(id)
            .ok_or_else(|| PlannerError::TeamNotFound { id: id.to_string() })
    }

    pub async fn read_team_members(&self) -> Result<MembersByTeam> {
        self.read_map(Collection::TeamMembers).await
    }

    pub async fn write_team_members(&self, members: &MembersByTeam) -> Result<()> {
        self.write_map(Collection::TeamMembers, members).await
    }

    // =========================================================================
    // Boards and tasks
    // =========================================================================

    pub async fn read_boards(&self) -> Result<IndexMap<BoardId, Board>> {
        self.read_records(Collection::Boards).await
    }

    pub async fn write_boards(&self, boards: &IndexMap<BoardId, Board>) -> Result<()> {
        self.write_map(Collection::Boards, boards).await
    }

    /// Read one board, failing with `BoardNotFound`
    pub async fn read_board(&self, id: &BoardId) -> Result<Board> {
        self.read_boards()
            .await?
            .shift_remove(id)
            .ok_or_else(|| PlannerError::BoardNotFound { id: id.to_string() })
    }

    pub async fn read_tasks(&self) -> Result<IndexMap<TaskId, Task>> {
        self.read_records(Collection::Tasks).await
    }

    pub async fn write_tasks(&self, tasks: &IndexMap<TaskId, Task>) -> Result<()> {
        self.write_map(Collection::Tasks, tasks).await
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Write a report into the output directory, creating it if needed
    ///
    /// Never replaces an existing file: an `AlreadyExists` io error is returned instead.
    pub async fn write_report(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(file_name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        debug!(path = %path.display(), "wrote report");
        Ok(path)
    }

    // =========================================================================
    // Activity log
    // =========================================================================

    /// Append an entry to the activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        let value = serde_json::to_value(entry)?;
        self.store.append_activity(&value).await?;
        Ok(())
    }

    /// Read activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        self.store
            .read_activity(limit)
            .await?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(PlannerError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_records_get_ids_from_keys() {
        let store = MemoryStore::new().with_document(
            Collection::Users,
            Document::from([(
                "user_5".to_string(),
                json!({
                    "name": "bo",
                    "display_name": "Bo",
                    "creation_time": "2024-01-02 03:04:05"
                }),
            )]),
        );
        let ctx = PlannerContext::new(Arc::new(store), "out");

        let users = ctx.read_users().await.unwrap();
        let user = &users[&UserId::from("user_5")];
        assert_eq!(user.id.as_str(), "user_5");
        assert_eq!(user.name, "bo");
    }

    #[tokio::test]
    async fn test_corrupt_record_is_reported() {
        let store = MemoryStore::new().with_document(
            Collection::Boards,
            Document::from([("board_1".to_string(), json!({"name": 3}))]),
        );
        let ctx = PlannerContext::new(Arc::new(store), "out");

        let err = ctx.read_boards().await.unwrap_err();
        assert!(matches!(err, PlannerError::Store(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_missing_records() {
        let ctx = PlannerContext::in_memory("out");
        let err = ctx.read_user(&UserId::from("user_1")).await.unwrap_err();
        assert!(matches!(err, PlannerError::UserNotFound { .. }));
        let err = ctx.read_board(&BoardId::from("board_1")).await.unwrap_err();
        assert!(matches!(err, PlannerError::BoardNotFound { .. }));
    }

    #[tokio::test]
    async fn test_write_report_creates_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = PlannerContext::in_memory(temp.path().join("nested").join("out"));

        let path = ctx.write_report("r.txt", "hello").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_write_report_keeps_existing_file() {
        let temp = TempDir::new().unwrap();
        let ctx = PlannerContext::in_memory(temp.path());

        let path = ctx.write_report("r.txt", "first").await.unwrap();
        let err = ctx.write_report("r.txt", "second").await.unwrap_err();
        assert!(matches!(err, PlannerError::Io(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "first");
    }

    #[tokio::test]
    async fn test_lock_order_is_independent_of_argument_order() {
        let ctx = Arc::new(PlannerContext::in_memory("out"));

        let a = {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    let _lock = ctx.lock(&[Collection::Tasks, Collection::Users]).await;
                    tokio::task::yield_now().await;
                }
            })
        };
        let b = {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    let _lock = ctx.lock(&[Collection::Users, Collection::Tasks]).await;
                    tokio::task::yield_now().await;
                }
            })
        };

        a.await.unwrap();
        b.await.unwrap();
    }

    #[tokio::test]
    async fn test_activity_round_trip() {
        let ctx = PlannerContext::in_memory("out");
        let entry = LogEntry::new("create user", json!({"name": "a"}), json!({"id": "user_1"}), None, 1);
        ctx.append_activity(&entry).await.unwrap();

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].op, "create user");
    }
}
