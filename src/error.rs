//! Error type shared by every record store backend. Any failure to open,
//! read, or write storage is a `StorageUnavailable`; the underlying cause
//! stays reachable through `source()`.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed lower-level failure (SQLite, filesystem) kept as the error source.
pub type StorageCause = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias used throughout the persistence layer.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage file could not be opened, read, or written.
    #[error("storage unavailable: {action}")]
    StorageUnavailable {
        action: &'static str,
        #[source]
        source: StorageCause,
    },
}

impl StoreError {
    pub fn unavailable(action: &'static str, source: impl Into<StorageCause>) -> Self {
        StoreError::StorageUnavailable {
            action,
            source: source.into(),
        }
    }

    /// Short description of the operation that failed.
    pub fn action(&self) -> &'static str {
        match self {
            StoreError::StorageUnavailable { action, .. } => action,
        }
    }
}

/// `anyhow::Context`-style helper that tags any lower-level error with the
/// action being attempted and converts it into [`StoreError`].
pub trait StorageContext<T> {
    fn storage_context(self, action: &'static str) -> StoreResult<T>;
}

impl<T, E> StorageContext<T> for Result<T, E>
where
    E: Into<StorageCause>,
{
    fn storage_context(self, action: &'static str) -> StoreResult<T> {
        self.map_err(|err| StoreError::unavailable(action, err))
    }
}
