use salesdb_core::db::schema::{apply_schema, ensure_schema};
use salesdb_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_both_tables() {
    let conn = open_db_in_memory().unwrap();

    ensure_schema(&conn).unwrap();
    assert_eq!(foreign_keys_enabled(&conn), 1);
}

#[test]
fn apply_schema_is_idempotent_on_file_databases() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.db");

    let first = open_db(&path).unwrap();
    apply_schema(&first).unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    apply_schema(&second).unwrap();
    ensure_schema(&second).unwrap();
    assert_eq!(foreign_keys_enabled(&second), 1);
}

#[test]
fn ensure_schema_reports_missing_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE department (Id INTEGER PRIMARY KEY, Name TEXT);")
        .unwrap();

    let err = ensure_schema(&conn).unwrap_err();
    assert!(matches!(err, DbError::MissingRequiredTable("seller")));
}

#[test]
fn ensure_schema_reports_missing_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE department (Id INTEGER PRIMARY KEY, Name TEXT);
         CREATE TABLE seller (
            Id INTEGER PRIMARY KEY,
            Name TEXT,
            Email TEXT,
            BaseSalary REAL,
            DepartmentId INTEGER
         );",
    )
    .unwrap();

    let err = ensure_schema(&conn).unwrap_err();
    assert!(matches!(
        err,
        DbError::MissingRequiredColumn {
            table: "seller",
            column: "BirthDate"
        }
    ));
}

fn foreign_keys_enabled(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap()
}
