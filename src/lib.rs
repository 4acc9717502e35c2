//! Core library surface for the Record Keeper TUI.
//!
//! The persistence layer sits behind the [`RecordStore`] trait so the terminal
//! UI never touches SQLite directly; `main.rs` picks the backend, hands it to
//! [`App`], and closes it again on the way out.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use models::Record;
pub use store::{MemoryRecordStore, RecordStore, SqliteRecordStore};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
