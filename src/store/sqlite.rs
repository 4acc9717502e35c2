use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::{
    ensure_schema, fetch_all_records, insert_record, open_connection, open_in_memory_connection,
    search_records,
};
use crate::error::{StoreError, StoreResult};
use crate::models::Record;

use super::RecordStore;

/// Record store backed by a single SQLite connection that it owns for its
/// whole lifetime.
pub struct SqliteRecordStore {
    conn: Connection,
    location: Option<PathBuf>,
}

impl SqliteRecordStore {
    /// Open (or create) the database file at `path` and initialize the
    /// schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = open_connection(path).inspect_err(log_failure)?;
        let mut store = Self {
            conn,
            location: Some(path.to_path_buf()),
        };
        store.initialize()?;
        info!(path = %path.display(), "opened record store");
        Ok(store)
    }

    /// Fresh private database that disappears with the store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_in_memory_connection().inspect_err(log_failure)?;
        let mut store = Self {
            conn,
            location: None,
        };
        store.initialize()?;
        debug!("opened in-memory record store");
        Ok(store)
    }

    /// File backing the store, `None` for in-memory stores.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Release the connection, reporting anything SQLite complains about on
    /// the way out (for example statements still being finalized).
    pub fn close(self) -> StoreResult<()> {
        let location = self.location;
        self.conn
            .close()
            .map_err(|(_, err)| StoreError::unavailable("failed to close SQLite database", err))
            .inspect_err(log_failure)?;
        match location {
            Some(path) => info!(path = %path.display(), "closed record store"),
            None => debug!("closed in-memory record store"),
        }
        Ok(())
    }
}

impl RecordStore for SqliteRecordStore {
    fn initialize(&mut self) -> StoreResult<()> {
        ensure_schema(&self.conn).inspect_err(log_failure)
    }

    fn insert(&mut self, title: &str, description: &str, tags: &str) -> StoreResult<Record> {
        let record = insert_record(&self.conn, title, description, tags)
            .inspect_err(log_failure)?;
        debug!(id = record.id, "inserted item");
        Ok(record)
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        let records = fetch_all_records(&self.conn).inspect_err(log_failure)?;
        debug!(count = records.len(), "listed items");
        Ok(records)
    }

    fn search(&self, term: &str) -> StoreResult<Vec<Record>> {
        let records = search_records(&self.conn, term).inspect_err(log_failure)?;
        debug!(
            term_len = term.chars().count(),
            count = records.len(),
            "searched items"
        );
        Ok(records)
    }
}

fn log_failure(err: &StoreError) {
    let cause = std::error::Error::source(err)
        .map(ToString::to_string)
        .unwrap_or_default();
    warn!(action = err.action(), %cause, "record store operation failed");
}
