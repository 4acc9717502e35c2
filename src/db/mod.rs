//! SQLite persistence split across logical submodules: connection bootstrap
//! and schema in `connection`, the item queries in `records`.

mod connection;
mod records;

pub use connection::{ensure_schema, open_connection, open_in_memory_connection};
pub use records::{fetch_all_records, insert_record, search_records};
