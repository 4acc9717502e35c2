//! The boundary between the terminal UI and persistence. The UI only ever
//! talks to a [`RecordStore`]; which backend sits behind it is decided once in
//! `main.rs`.

mod memory;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use crate::error::StoreResult;
use crate::models::Record;

/// Persistence contract for items. All calls are synchronous; every failure
/// surfaces as `StoreError::StorageUnavailable` and nothing is retried.
pub trait RecordStore {
    /// Make sure the backing table exists. Idempotent.
    fn initialize(&mut self) -> StoreResult<()>;

    /// Persist a new item and return it with its assigned id and creation
    /// time. An empty title is accepted.
    fn insert(&mut self, title: &str, description: &str, tags: &str) -> StoreResult<Record>;

    /// Snapshot of every item, ordered by id.
    fn list_all(&self) -> StoreResult<Vec<Record>>;

    /// Items for which [`Record::matches`] holds, in the same order as
    /// [`RecordStore::list_all`]. An empty term returns everything.
    fn search(&self, term: &str) -> StoreResult<Vec<Record>>;
}
