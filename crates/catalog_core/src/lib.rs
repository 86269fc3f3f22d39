//! Core domain logic for the library catalog.
//! This crate owns the author request workflows and their store contracts.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;
pub mod view;

pub use config::{CatalogConfig, DatabaseConfig, LoggingConfig};
pub use error::{ErrorKind, WorkflowError, WorkflowResult};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::author::{author_url, Author, AuthorDraft, AuthorId, AUTHOR_LIST_URL};
pub use model::book::{Book, BookId, BookSummary};
pub use repo::author_repo::{AuthorStore, RepoError, RepoResult};
pub use repo::book_repo::BookStore;
pub use repo::sqlite_store::SqliteCatalogStore;
pub use service::author_workflow::{AuthorDeleteForm, AuthorWorkflow};
pub use validation::{validate_author_form, AuthorForm, FieldError, FieldErrorKind, ValidationErrors};
pub use view::{AuthorFormView, AuthorView, BookView, Response, View, ViewContext};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
