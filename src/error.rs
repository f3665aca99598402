use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task database is not available")]
    Unavailable,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("task {id} has an unknown status: {value}")]
    InvalidStatus { id: i64, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task name cannot be empty")]
    EmptyName,
}

/// Failure of a list operation.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
