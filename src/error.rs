//! Custom error types for lyricist

use thiserror::Error;

/// Main error type for lyricist operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Malformed corpus: {0}")]
    CorpusFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Not initialized: run 'lyricist init' first")]
    NotInitialized,

    #[error("Already initialized at {0}")]
    AlreadyInitialized(String),
}

/// Coarse error classes exposed to callers of the query and ingestion APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Conflict,
    IoFailure,
    Internal,
}

impl ErrorKind {
    /// Status code used by the wire dispatcher
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::InvalidArgument => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::IoFailure | ErrorKind::Internal => 500,
        }
    }
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::CorpusFormat(_) | Error::Io(_) | Error::Json(_) => ErrorKind::IoFailure,
            Error::Database(e) if is_unique_violation(e) || is_lock_contention(e) => {
                ErrorKind::Conflict
            }
            _ => ErrorKind::Internal,
        }
    }
}

/// True when SQLite rejected a write because of a UNIQUE constraint
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// True when SQLite gave up waiting for a lock held by another writer.
///
/// Covers `SQLITE_BUSY` and `SQLITE_LOCKED` with all their extended codes,
/// including `SQLITE_BUSY_SNAPSHOT` (517) from a stale WAL read snapshot.
pub(crate) fn is_lock_contention(err: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db) = err else {
        return false;
    };
    db.code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(is_busy_code)
}

fn is_busy_code(extended: i32) -> bool {
    const SQLITE_BUSY: i32 = 5;
    const SQLITE_LOCKED: i32 = 6;
    matches!(extended & 0xff, SQLITE_BUSY | SQLITE_LOCKED)
}

/// Result type alias for lyricist
pub type Result<T> = std::result::Result<T, Error>;
