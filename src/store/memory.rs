use chrono::{SubsecRound, Utc};

use crate::error::StoreResult;
use crate::models::Record;

use super::RecordStore;

/// Non-durable backend that keeps items in a `Vec`. Ids come from a counter
/// that only ever grows, mirroring SQLite's `AUTOINCREMENT`.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Vec<Record>,
    last_id: i64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn initialize(&mut self) -> StoreResult<()> {
        Ok(())
    }

    fn insert(&mut self, title: &str, description: &str, tags: &str) -> StoreResult<Record> {
        self.last_id += 1;
        let record = Record {
            id: self.last_id,
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.to_string(),
            // Second precision, same as `CURRENT_TIMESTAMP`.
            created_at: Utc::now().trunc_subsecs(0),
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn search(&self, term: &str) -> StoreResult<Vec<Record>> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.matches(term))
            .cloned()
            .collect())
    }
}
