use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use super::error::{Result, StorageError};

pub const DB_SCHEMA_VERSION: i64 = 1;

const BUSY_TIMEOUT: Duration = Duration::from_millis(500);

const STUDENT_COLUMNS: [&str; 4] = ["id", "name", "course", "mobile"];

/// Where the student store lives. Fixed at process start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Produces one independent, ready-to-use connection per call.
pub trait ConnectionProvider {
    fn connect(&self) -> Result<Connection>;
}

#[derive(Clone, Debug)]
pub struct SqliteConnectionProvider {
    config: StoreConfig,
}

impl SqliteConnectionProvider {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Open the store once so schema problems surface at startup.
    pub fn init(&self) -> Result<()> {
        self.connect().map(drop)
    }

    /// Delete the backing file. A missing file is not an error.
    pub fn reset_all(&self) -> Result<()> {
        if !self.config.path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.config.path)?;
        Ok(())
    }

    fn migrate(conn: &Connection) -> Result<()> {
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(StorageError::Connection)?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        if version != 0 {
            return Err(StorageError::SchemaVersion {
                found: version,
                expected: DB_SCHEMA_VERSION,
            });
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        // An unversioned store may already carry a students table. It is
        // adopted only when every column the queries bind is present.
        let existing = Self::student_columns(conn)?;
        if !existing.is_empty() {
            let missing: Vec<String> = STUDENT_COLUMNS
                .iter()
                .filter(|col| !existing.iter().any(|e| e.eq_ignore_ascii_case(col)))
                .map(|col| col.to_string())
                .collect();
            if !missing.is_empty() {
                return Err(StorageError::IncompatibleTable { missing });
            }
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                course TEXT NOT NULL,
                mobile TEXT NOT NULL
            );
            "#,
        )
        .map_err(StorageError::Connection)?;
        conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)
            .map_err(StorageError::Connection)?;
        Ok(())
    }

    fn student_columns(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn
            .prepare("SELECT name FROM pragma_table_info('students')")
            .map_err(StorageError::Connection)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(StorageError::Connection)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::Connection)
    }
}

impl ConnectionProvider for SqliteConnectionProvider {
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.config.path).map_err(StorageError::Connection)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(StorageError::Connection)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(StorageError::Connection)?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(StorageError::Connection)?;

        Self::migrate(&conn)?;
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::OptionalExtension;
    use tempfile::TempDir;

    fn provider_in(dir: &TempDir) -> SqliteConnectionProvider {
        SqliteConnectionProvider::new(StoreConfig::new(dir.path().join("students.db")))
    }

    #[test]
    fn reset_all_ok_when_missing() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        provider.reset_all().unwrap();
        assert!(!provider.path().exists());
    }

    #[test]
    fn reset_all_removes_existing_file() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        std::fs::write(provider.path(), b"dummy").unwrap();
        assert!(provider.path().exists());
        provider.reset_all().unwrap();
        assert!(!provider.path().exists());
    }

    #[test]
    fn init_creates_students_table_and_sets_version() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        provider.init().unwrap();

        let conn = Connection::open(provider.path()).unwrap();
        let table = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='students'",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .unwrap();
        assert_eq!(table.as_deref(), Some("students"));

        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, DB_SCHEMA_VERSION);
    }

    #[test]
    fn init_adopts_unversioned_legacy_table() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        {
            let conn = Connection::open(provider.path()).unwrap();
            conn.execute_batch(
                r#"
                CREATE TABLE students (id INTEGER PRIMARY KEY, name TEXT, course TEXT, mobile TEXT);
                INSERT INTO students (name, course, mobile) VALUES ('Grace', 'Math', '555-1000');
                "#,
            )
            .unwrap();
        }

        provider.init().unwrap();

        let conn = Connection::open(provider.path()).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn init_refuses_legacy_table_with_other_columns() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        {
            let conn = Connection::open(provider.path()).unwrap();
            conn.execute_batch(
                "CREATE TABLE students (id INTEGER PRIMARY KEY, full_name TEXT, course TEXT, phone TEXT);",
            )
            .unwrap();
        }

        let err = provider
            .init()
            .expect_err("init should refuse a table it cannot query");
        match &err {
            StorageError::IncompatibleTable { missing } => {
                assert_eq!(missing, &vec!["name".to_string(), "mobile".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("--reset"));

        let conn = Connection::open(provider.path()).unwrap();
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, 0);
    }

    #[test]
    fn connect_fails_on_mismatched_schema_version() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        {
            let conn = Connection::open(provider.path()).unwrap();
            conn.execute_batch("PRAGMA user_version = 999;").unwrap();
        }

        let err = provider
            .init()
            .expect_err("init should fail on version mismatch");
        assert!(matches!(
            err,
            StorageError::SchemaVersion {
                found: 999,
                expected: DB_SCHEMA_VERSION
            }
        ));
        assert!(err.to_string().contains("--reset"));
    }

    #[test]
    fn connect_fails_when_store_unreachable() {
        let dir = TempDir::new().unwrap();
        let provider = SqliteConnectionProvider::new(StoreConfig::new(
            dir.path().join("missing").join("students.db"),
        ));

        let err = provider.connect().expect_err("directory does not exist");
        assert!(matches!(err, StorageError::Connection(_)));
    }

    #[test]
    fn each_connect_yields_an_independent_handle() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);

        let a = provider.connect().unwrap();
        let b = provider.connect().unwrap();
        a.execute(
            "INSERT INTO students (name, course, mobile) VALUES ('A', 'Math', '1')",
            [],
        )
        .unwrap();
        drop(a);

        let count: i64 = b
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
