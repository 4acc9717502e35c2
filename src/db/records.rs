use rusqlite::{params, Connection, Row};

use crate::error::{StorageContext, StoreError, StoreResult};
use crate::models::Record;

/// Map a `SELECT id, title, description, tags, created_date` row. The nullable
/// text columns come back as empty strings so the UI never has to care.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        tags: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        created_at: row.get(4)?,
    })
}

/// Insert a new item and echo back the stored row, including the id and
/// timestamp SQLite assigned. The implicit transaction only commits once the
/// statement runs to completion, so the rows are drained before returning;
/// a failed commit (for example `SQLITE_BUSY`) surfaces as an error.
pub fn insert_record(
    conn: &Connection,
    title: &str,
    description: &str,
    tags: &str,
) -> StoreResult<Record> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO items (title, description, tags) VALUES (?1, ?2, ?3)
             RETURNING id, title, description, tags, created_date",
        )
        .storage_context("failed to prepare item insert")?;

    let mut rows = stmt
        .query(params![title, description, tags])
        .storage_context("failed to insert item")?;

    let record = match rows.next().storage_context("failed to insert item")? {
        Some(row) => record_from_row(row).storage_context("failed to read inserted item")?,
        None => {
            return Err(StoreError::unavailable(
                "failed to insert item",
                "insert returned no row",
            ))
        }
    };

    while rows.next().storage_context("failed to commit item")?.is_some() {}

    Ok(record)
}

/// Every item in insertion order.
pub fn fetch_all_records(conn: &Connection) -> StoreResult<Vec<Record>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, description, tags, created_date
             FROM items
             ORDER BY id",
        )
        .storage_context("failed to prepare item query")?;

    let records = stmt
        .query_map([], record_from_row)
        .storage_context("failed to load items")?
        .collect::<Result<Vec<_>, _>>()
        .storage_context("failed to collect items")?;

    Ok(records)
}

/// Items whose title, description, or tags contain `term`, ignoring case.
/// `instr` is used instead of `LIKE` so `%` and `_` in the term stay literal.
pub fn search_records(conn: &Connection, term: &str) -> StoreResult<Vec<Record>> {
    if term.is_empty() {
        return fetch_all_records(conn);
    }

    let mut stmt = conn
        .prepare(
            "SELECT id, title, description, tags, created_date
             FROM items
             WHERE instr(unicode_lower(title), ?1) > 0
                OR instr(unicode_lower(description), ?1) > 0
                OR instr(unicode_lower(tags), ?1) > 0
             ORDER BY id",
        )
        .storage_context("failed to prepare search query")?;

    let records = stmt
        .query_map([term.to_lowercase()], record_from_row)
        .storage_context("failed to search items")?
        .collect::<Result<Vec<_>, _>>()
        .storage_context("failed to collect search results")?;

    Ok(records)
}
