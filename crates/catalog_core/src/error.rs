//! Workflow error taxonomy surfaced to the HTTP error boundary.
//!
//! # Invariants
//! - Every error exposes an explicit `ErrorKind` carrying its status code.
//! - Store failures are wrapped unmodified; `source()` reaches the original.
//! - Field validation never produces a `WorkflowError`.

use crate::repo::author_repo::RepoError;
use http::StatusCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Discriminant used by the error boundary to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Store,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failure of an author workflow handler.
#[derive(Debug)]
pub enum WorkflowError {
    /// The requested author does not exist. Carries the raw requested id.
    NotFound { id: String },
    /// Any data-access failure, propagated as-is.
    Store(RepoError),
}

impl WorkflowError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { .. } => write!(f, "Author not found"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RepoError> for WorkflowError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::not_found(id.to_string()),
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, WorkflowError};
    use crate::repo::author_repo::RepoError;
    use http::StatusCode;
    use std::error::Error;
    use uuid::Uuid;

    #[test]
    fn kinds_map_to_status_codes() {
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorKind::Store.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn repo_not_found_becomes_not_found_kind() {
        let id = Uuid::new_v4();
        let err = WorkflowError::from(RepoError::NotFound(id));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(err, WorkflowError::NotFound { id: raw } if raw == id.to_string()));
    }

    #[test]
    fn store_errors_keep_their_source() {
        let err = WorkflowError::from(RepoError::InvalidData("bad row".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "invalid persisted catalog data: bad row");
        assert!(err.source().is_some());
    }
}
