use insyd_core::db::migrations::latest_version;
use insyd_core::db::{open_db, open_db_in_memory, reset_schema, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["users", "follows", "activities", "notifications"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("insyd.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO users (name) VALUES ('Alice');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let users: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(users, 1);
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
}

#[test]
fn reset_schema_drops_rows_and_restarts_ids() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO users (name) VALUES ('Alice'), ('Bob');
         INSERT INTO follows (follower_id, followee_id) VALUES (2, 1);",
    )
    .unwrap();

    reset_schema(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(row_count(&conn, "users"), 0);
    assert_eq!(row_count(&conn, "follows"), 0);

    let id: i64 = conn
        .query_row(
            "INSERT INTO users (name) VALUES ('Dana') RETURNING id;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(id, 1);
}

#[test]
fn schema_rejects_self_edges_and_duplicate_edges() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("INSERT INTO users (name) VALUES ('Alice'), ('Bob');")
        .unwrap();

    assert!(conn
        .execute(
            "INSERT INTO follows (follower_id, followee_id) VALUES (1, 1);",
            []
        )
        .is_err());

    conn.execute(
        "INSERT INTO follows (follower_id, followee_id) VALUES (2, 1);",
        [],
    )
    .unwrap();
    assert!(conn
        .execute(
            "INSERT INTO follows (follower_id, followee_id) VALUES (2, 1);",
            []
        )
        .is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
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
