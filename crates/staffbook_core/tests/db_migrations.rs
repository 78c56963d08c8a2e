use rusqlite::Connection;
use staffbook_core::db::migrations::{self, latest_version};
use staffbook_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_creates_employees_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "employees");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staffbook.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO employees (name, age) VALUES ('Ana', 30);", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let rows: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn existing_employees_table_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(include_str!("../src/db/migrations/0001_init.sql"))
        .unwrap();
    conn.execute("INSERT INTO employees (name) VALUES ('Bo');", [])
        .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let name: String = conn
        .query_row("SELECT name FROM employees;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Bo");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(open_db(&path).unwrap_err().is_schema_setup());
}

#[test]
fn unreachable_path_is_a_connect_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("staffbook.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Connect { .. }));
    assert!(!err.is_schema_setup());
}

fn schema_version(conn: &Connection) -> u32 {
    migrations::schema_version(conn).unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
