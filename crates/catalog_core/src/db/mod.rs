//! Catalog database: connection setup and schema versioning.
//!
//! A connection handed out by this module always carries the current
//! `authors`/`books` schema with foreign keys enforced. The schema version
//! lives in `PRAGMA user_version`; files written by a newer catalog are
//! refused rather than downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening, migrating or querying the catalog database.
#[derive(Debug)]
pub enum DbError {
    /// The database could not be opened or its connection pragmas set.
    Connect(rusqlite::Error),
    /// Schema step `version` failed; no step of that run was kept.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a catalog with a newer schema.
    SchemaTooNew { found: u32, supported: u32 },
    /// A catalog statement failed on an open connection.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "cannot open catalog database: {err}"),
            Self::Migration { version, source } => {
                write!(f, "catalog schema step {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "catalog schema version {found} is newer than supported {supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect(err) | Self::Sqlite(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
