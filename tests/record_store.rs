use std::collections::HashSet;
use std::error::Error;
use std::fs;

use record_keeper::{Record, RecordStore, SqliteRecordStore, StoreError};
use tempfile::tempdir;

fn ids(records: &[Record]) -> Vec<i64> {
    records.iter().map(|record| record.id).collect()
}

#[test]
fn scenario_book_and_manual() {
    let mut store = SqliteRecordStore::open_in_memory().unwrap();

    let book = store.insert("Book", "A novel", "fiction,drama").unwrap();
    let manual = store.insert("Manual", "Tech guide", "reference").unwrap();

    assert_eq!(ids(&store.search("drama").unwrap()), vec![book.id]);
    assert_eq!(ids(&store.search("guide").unwrap()), vec![manual.id]);
    assert_eq!(ids(&store.search("a").unwrap()), vec![book.id, manual.id]);

    let all = store.list_all().unwrap();
    assert_eq!(ids(&all), vec![book.id, manual.id]);
    assert_ne!(book.id, manual.id);
    assert_eq!(all[0].created_at, book.created_at);
    assert_eq!(all[1].created_at, manual.created_at);
}

#[test]
fn search_ignores_case() {
    let mut store = SqliteRecordStore::open_in_memory().unwrap();
    let hello = store.insert("Hello", "", "").unwrap();

    assert_eq!(store.search("HELLO").unwrap(), vec![hello.clone()]);
    assert_eq!(store.search("hello").unwrap(), vec![hello.clone()]);
    assert_eq!(store.search("eLL").unwrap(), vec![hello]);
}

#[test]
fn empty_search_equals_list_all() {
    let mut store = SqliteRecordStore::open_in_memory().unwrap();
    assert!(store.search("").unwrap().is_empty());

    store.insert("one", "", "").unwrap();
    store.insert("two", "second", "x").unwrap();

    assert_eq!(store.search("").unwrap(), store.list_all().unwrap());
}

#[test]
fn search_agrees_with_record_predicate() {
    let mut store = SqliteRecordStore::open_in_memory().unwrap();
    let rows = [
        ("Book", "A novel", "fiction,drama"),
        ("Manual", "Tech guide", "reference"),
        ("", "", ""),
        ("Café", "crème brûlée", "FOOD"),
        ("50% off", "snake_case", "a|b"),
        ("ÉTÉ", "Summer", ""),
    ];
    for (title, description, tags) in rows {
        store.insert(title, description, tags).unwrap();
    }
    let all = store.list_all().unwrap();

    let terms = [
        "", "a", "A", "o", "novel", "ref", "é", "É", "CAFÉ", "brûlée", "food", "%", "_", "|",
        "e c", "missing", " ",
    ];
    for term in terms {
        let expected: Vec<i64> = all
            .iter()
            .filter(|record| record.matches(term))
            .map(|record| record.id)
            .collect();
        assert_eq!(
            ids(&store.search(term).unwrap()),
            expected,
            "term {term:?}"
        );
    }
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut store = SqliteRecordStore::open_in_memory().unwrap();

    let inserted: Vec<Record> = (0..25)
        .map(|n| store.insert(&format!("item {n}"), "", "").unwrap())
        .collect();

    let unique: HashSet<i64> = inserted.iter().map(|record| record.id).collect();
    assert_eq!(unique.len(), inserted.len());
    assert!(inserted.windows(2).all(|pair| pair[0].id < pair[1].id));
    assert_eq!(store.list_all().unwrap(), inserted);
}

#[test]
fn records_persist_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("records.sqlite");

    let mut store = SqliteRecordStore::open(&path).unwrap();
    assert_eq!(store.location(), Some(path.as_path()));
    let first = store.insert("Book", "A novel", "fiction,drama").unwrap();
    store.close().unwrap();

    let mut store = SqliteRecordStore::open(&path).unwrap();
    store.initialize().unwrap();
    store.initialize().unwrap();
    assert_eq!(store.list_all().unwrap(), vec![first.clone()]);

    let second = store.insert("Manual", "", "").unwrap();
    assert!(second.id > first.id);
    store.close().unwrap();
}

#[test]
fn ids_are_not_reused_after_external_delete() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.sqlite");

    let mut store = SqliteRecordStore::open(&path).unwrap();
    let first = store.insert("temporary", "", "").unwrap();
    store.close().unwrap();

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute("DELETE FROM items", []).unwrap();
    drop(conn);

    let mut store = SqliteRecordStore::open(&path).unwrap();
    let second = store.insert("kept", "", "").unwrap();
    assert!(second.id > first.id);
}

#[test]
fn open_fails_when_parent_is_a_file() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "plain file").unwrap();

    let err = SqliteRecordStore::open(blocker.join("records.sqlite"))
        .err()
        .unwrap();

    assert!(matches!(err, StoreError::StorageUnavailable { .. }));
    assert_eq!(err.action(), "failed to create data directory");
    assert!(err.source().is_some());
}

#[test]
fn open_fails_on_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.sqlite");
    fs::write(&path, "this is definitely not a sqlite database ".repeat(200)).unwrap();

    let err = SqliteRecordStore::open(&path).err().unwrap();

    assert!(matches!(err, StoreError::StorageUnavailable { .. }));
    assert_eq!(err.action(), "failed to create items table");
}

#[test]
fn insert_fails_while_another_connection_holds_a_read_lock() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.sqlite");
    let mut store = SqliteRecordStore::open(&path).unwrap();
    let seed = store.insert("seed", "", "").unwrap();

    let reader = rusqlite::Connection::open(&path).unwrap();
    reader.execute_batch("BEGIN").unwrap();
    let visible: i64 = reader
        .query_row("SELECT count(*) FROM items", [], |row| row.get(0))
        .unwrap();
    assert_eq!(visible, 1);

    let err = store.insert("contended", "", "").err().unwrap();
    assert!(matches!(err, StoreError::StorageUnavailable { .. }));

    reader.execute_batch("COMMIT").unwrap();
    assert_eq!(store.list_all().unwrap(), vec![seed.clone()]);

    let fresh = rusqlite::Connection::open(&path).unwrap();
    let titles: Vec<String> = fresh
        .prepare("SELECT title FROM items ORDER BY id")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(titles, ["seed"]);

    let later = store.insert("after release", "", "").unwrap();
    assert!(later.id > seed.id);
    assert_eq!(store.list_all().unwrap().len(), 2);
}
