//! Author store contract and shared repository error type.
//!
//! # Responsibility
//! - Describe author CRUD as the workflow sees it.
//! - Carry store failures without interpreting them.
//!
//! # Invariants
//! - `list_authors` is ordered by `family_name` ascending (binary collation).
//! - `delete_author` on a missing id is not an error.

use crate::db::DbError;
use crate::model::author::{Author, AuthorDraft, AuthorId};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(AuthorId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "author not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for author records.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors sorted by family name.
    async fn list_authors(&self) -> RepoResult<Vec<Author>>;

    async fn find_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;

    /// Persists a new author; the store assigns the id.
    async fn create_author(&self, draft: &AuthorDraft) -> RepoResult<Author>;

    /// Replaces every mutable field of `author.id` and returns the stored
    /// record. Fails with `RepoError::NotFound` when the id does not exist.
    async fn update_author(&self, author: &Author) -> RepoResult<Author>;

    /// Removes an author. Returns whether a row was removed.
    async fn delete_author(&self, id: AuthorId) -> RepoResult<bool>;
}
