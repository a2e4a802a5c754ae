pub mod jsonl_store;
pub mod sqlite_store;

use std::io;
use std::sync::Arc;
use thiserror::Error;

use crate::config::settings::StoreBackend;
use crate::models::tracking_event::TrackingEvent;
use jsonl_store::JsonlStore;
use sqlite_store::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event store I/O failure: {0}")]
    Io(#[from] io::Error),
    #[error("sqlite failure: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("event store lock poisoned: {0}")]
    Lock(String),
}

/// Append-only storage for tracking events.
///
/// Calls block; handlers run them on the blocking thread pool.
pub trait EventStore: Send + Sync {
    fn append(&self, event: &TrackingEvent) -> Result<(), StoreError>;

    /// Every stored event. A store that has never been written to is empty.
    fn load_all(&self) -> Result<Vec<TrackingEvent>, StoreError>;

    /// Cheap liveness probe for the health endpoint
    fn ping(&self) -> Result<(), StoreError>;

    fn describe(&self) -> String;
}

/// Open the configured backend
pub fn open_store(backend: &StoreBackend) -> Result<Arc<dyn EventStore>, StoreError> {
    let store: Arc<dyn EventStore> = match backend {
        StoreBackend::Jsonl { dir } => Arc::new(JsonlStore::new(dir)),
        StoreBackend::Sqlite { path } => Arc::new(SqliteStore::new(path)?),
    };
    Ok(store)
}
