use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to connect to the student store: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error(
        "database schema version mismatch (found {found}, expected {expected}); please run with --reset option"
    )]
    SchemaVersion { found: i64, expected: i64 },

    #[error(
        "existing students table lacks columns {missing:?}; please run with --reset option"
    )]
    IncompatibleTable { missing: Vec<String> },

    #[error("statement rejected by the student store: {0}")]
    Constraint(#[source] rusqlite::Error),

    #[error("failed to reset the student store: {0}")]
    Reset(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;
