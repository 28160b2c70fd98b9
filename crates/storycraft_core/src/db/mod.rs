//! SQLite bootstrap and the storage error model.
//!
//! # Responsibility
//! - Open StoryCraft's state database and bring its schema up to date.
//! - Describe every way durable state can fail to load or save.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No key-value reads/writes happen before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failures of the state storage layer.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// State file was written by a newer StoryCraft build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// The data directory holding the state file could not be created.
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The project collection could not be encoded as JSON.
    Encode(serde_json::Error),
    /// Backend cannot accept reads or writes right now.
    Unavailable(String),
}

impl StorageError {
    /// Stable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite_failed",
            Self::UnsupportedSchemaVersion { .. } => "schema_too_new",
            Self::DataDir { .. } => "data_dir_failed",
            Self::Encode(_) => "encode_failed",
            Self::Unavailable(_) => "storage_unavailable",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "state file schema {found} is newer than this build supports ({supported})"
            ),
            Self::DataDir { path, source } => write!(
                f,
                "failed to create data directory `{}`: {source}",
                path.display()
            ),
            Self::Encode(err) => write!(f, "failed to encode projects: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::DataDir { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
