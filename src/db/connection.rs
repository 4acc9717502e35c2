use std::fs;
use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use crate::error::{StorageContext, StoreResult};

/// SQL name of the Unicode-aware lowercase function registered on every
/// connection. SQLite's built-in `lower()` only folds ASCII, which would make
/// search disagree with `Record::matches` for accented text.
pub(crate) const LOWER_FN: &str = "unicode_lower";

/// Open (creating if needed) the SQLite file at `path` and register the
/// functions the queries rely on. The schema is not touched here; callers run
/// [`ensure_schema`] next.
pub fn open_connection(path: &Path) -> StoreResult<Connection> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).storage_context("failed to create data directory")?;
    }

    let conn = Connection::open(path).storage_context("failed to open SQLite database")?;
    register_functions(&conn)?;
    Ok(conn)
}

/// Private in-memory database with the same functions registered. Used by
/// tests and throwaway sessions.
pub fn open_in_memory_connection() -> StoreResult<Connection> {
    let conn =
        Connection::open_in_memory().storage_context("failed to open in-memory database")?;
    register_functions(&conn)?;
    Ok(conn)
}

/// Create the `items` table if it is missing. Running it against an existing
/// database is a no-op, so it is safe on every startup. A file that is not a
/// SQLite database fails here, on the first real read of the header.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            tags TEXT,
            created_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .storage_context("failed to create items table")?;

    Ok(())
}

fn register_functions(conn: &Connection) -> StoreResult<()> {
    conn.create_scalar_function(
        LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )
    .storage_context("failed to register search function")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_lower_folds_non_ascii_and_passes_null() {
        let conn = open_in_memory_connection().unwrap();

        let folded: String = conn
            .query_row("SELECT unicode_lower('ÀÉÎ Straße')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "àéî straße");

        let null: Option<String> = conn
            .query_row("SELECT unicode_lower(NULL)", [], |row| row.get(0))
            .unwrap();
        assert!(null.is_none());
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = open_in_memory_connection().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        let columns: Vec<String> = conn
            .prepare("SELECT name FROM pragma_table_info('items') ORDER BY cid")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            columns,
            ["id", "title", "description", "tags", "created_date"]
        );
    }
}
