//! Book domain model (read-only from the author workflow's point of view).
//!
//! # Invariants
//! - `author` always references an existing author id at write time.
//! - An author referenced by at least one book is not deletable through the
//!   author workflow.

use crate::model::author::AuthorId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BookId = Uuid;

const BOOK_URL_PREFIX: &str = "/catalog/book/";

/// Persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub summary: String,
    pub author: AuthorId,
}

/// `title` + `summary` projection used by the author detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub summary: String,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

impl BookSummary {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Canonical URL for a book id.
pub fn book_url(id: BookId) -> String {
    format!("{BOOK_URL_PREFIX}{id}")
}
