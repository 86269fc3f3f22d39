//! Book store contract, limited to what the author workflow needs.

use crate::model::author::AuthorId;
use crate::model::book::{Book, BookSummary};
use crate::repo::author_repo::RepoResult;
use async_trait::async_trait;

/// Store interface for books referencing an author.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Full book records written by `author`, ordered by title.
    async fn list_books_by_author(&self, author: AuthorId) -> RepoResult<Vec<Book>>;

    /// `title` + `summary` projection of the books written by `author`.
    async fn list_book_summaries_by_author(&self, author: AuthorId)
        -> RepoResult<Vec<BookSummary>>;

    /// Inserts a book for an existing author; the store assigns the id.
    async fn create_book(&self, title: &str, summary: &str, author: AuthorId) -> RepoResult<Book>;
}
