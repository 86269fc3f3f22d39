//! SQLite implementation of the author and book stores.
//!
//! # Responsibility
//! - Own the single catalog connection for the process lifetime.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - All statements run while holding the connection mutex; concurrent
//!   callers are serialized at the connection.
//! - Read paths reject malformed persisted ids instead of masking them.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::author::{Author, AuthorDraft, AuthorId};
use crate::model::book::{Book, BookSummary};
use crate::repo::author_repo::{AuthorStore, RepoError, RepoResult};
use crate::repo::book_repo::BookStore;
use async_trait::async_trait;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    family_name,
    date_of_birth,
    date_of_death
FROM authors";

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    summary,
    author_id
FROM books";

/// Shared SQLite-backed catalog store.
///
/// Cloning yields another handle to the same connection.
#[derive(Debug, Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    /// Wraps an already bootstrapped connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens (and migrates) a catalog database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a fresh in-memory catalog.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Closes the connection when this is the last handle.
    ///
    /// With other handles still alive the connection stays open until the
    /// last one is dropped.
    pub fn close(self) -> RepoResult<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(conn) => {
                conn.into_inner().close().map_err(|(_, err)| err)?;
                info!("event=db_close module=repo status=ok");
                Ok(())
            }
            Err(_) => {
                debug!("event=db_close module=repo status=skipped reason=shared_handle");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl AuthorStore for SqliteCatalogStore {
    async fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{AUTHOR_SELECT_SQL} ORDER BY family_name ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    async fn find_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let conn = self.conn.lock().await;
        select_author(&conn, id)
    }

    async fn create_author(&self, draft: &AuthorDraft) -> RepoResult<Author> {
        let author = Author::from_draft(Uuid::new_v4(), draft.clone());
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO authors (
                id,
                first_name,
                family_name,
                date_of_birth,
                date_of_death
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                author.id.to_string(),
                author.first_name.as_str(),
                author.family_name.as_str(),
                author.date_of_birth,
                author.date_of_death,
            ],
        )?;

        Ok(author)
    }

    async fn update_author(&self, author: &Author) -> RepoResult<Author> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE authors
             SET
                first_name = ?1,
                family_name = ?2,
                date_of_birth = ?3,
                date_of_death = ?4
             WHERE id = ?5;",
            params![
                author.first_name.as_str(),
                author.family_name.as_str(),
                author.date_of_birth,
                author.date_of_death,
                author.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(author.id));
        }

        select_author(&conn, author.id)?.ok_or(RepoError::NotFound(author.id))
    }

    async fn delete_author(&self, id: AuthorId) -> RepoResult<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM authors WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

#[async_trait]
impl BookStore for SqliteCatalogStore {
    async fn list_books_by_author(&self, author: AuthorId) -> RepoResult<Vec<Book>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE author_id = ?1 ORDER BY title ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([author.to_string()])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    async fn list_book_summaries_by_author(
        &self,
        author: AuthorId,
    ) -> RepoResult<Vec<BookSummary>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, title, summary
             FROM books
             WHERE author_id = ?1
             ORDER BY title ASC, id ASC;",
        )?;
        let mut rows = stmt.query([author.to_string()])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(BookSummary {
                id: parse_uuid(row, "id", "books.id")?,
                title: row.get("title")?,
                summary: row.get("summary")?,
            });
        }

        Ok(books)
    }

    async fn create_book(&self, title: &str, summary: &str, author: AuthorId) -> RepoResult<Book> {
        let book = Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            summary: summary.to_string(),
            author,
        };
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO books (id, title, summary, author_id) VALUES (?1, ?2, ?3, ?4);",
            params![
                book.id.to_string(),
                book.title.as_str(),
                book.summary.as_str(),
                book.author.to_string(),
            ],
        )?;

        Ok(book)
    }
}

fn select_author(conn: &Connection, id: AuthorId) -> RepoResult<Option<Author>> {
    let mut stmt = conn.prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
    let author = stmt
        .query_row([id.to_string()], |row| Ok(parse_author_row(row)))
        .optional()?;
    author.transpose()
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    Ok(Author {
        id: parse_uuid(row, "id", "authors.id")?,
        first_name: row.get("first_name")?,
        family_name: row.get("family_name")?,
        date_of_birth: row.get("date_of_birth")?,
        date_of_death: row.get("date_of_death")?,
    })
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        id: parse_uuid(row, "id", "books.id")?,
        title: row.get("title")?,
        summary: row.get("summary")?,
        author: parse_uuid(row, "author_id", "books.author_id")?,
    })
}

fn parse_uuid(row: &Row<'_>, column: &str, qualified: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {qualified}")))
}

#[cfg(test)]
mod tests {
    use super::SqliteCatalogStore;
    use crate::model::author::AuthorDraft;
    use crate::repo::author_repo::{AuthorStore, RepoError};
    use crate::repo::book_repo::BookStore;

    fn draft(first: &str, family: &str) -> AuthorDraft {
        AuthorDraft {
            first_name: first.to_string(),
            family_name: family.to_string(),
            ..AuthorDraft::default()
        }
    }

    #[tokio::test]
    async fn malformed_persisted_id_is_rejected() {
        let store = SqliteCatalogStore::open_in_memory().unwrap();
        {
            let conn = store.conn.lock().await;
            conn.execute(
                "INSERT INTO authors (id, first_name, family_name) VALUES ('not-a-uuid', 'A', 'B');",
                [],
            )
            .unwrap();
        }

        let err = store.list_authors().await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("authors.id")));
    }

    #[tokio::test]
    async fn books_foreign_key_blocks_author_delete() {
        let store = SqliteCatalogStore::open_in_memory().unwrap();
        let author = store.create_author(&draft("Jane", "Austen")).await.unwrap();
        store
            .create_book("Emma", "A matchmaker", author.id)
            .await
            .unwrap();

        let err = store.delete_author(author.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Db(_)));
        assert!(store.find_author(author.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn close_releases_last_handle() {
        let store = SqliteCatalogStore::open_in_memory().unwrap();
        let shared = store.clone();

        shared.close().unwrap();
        store.create_author(&draft("Still", "Open")).await.unwrap();
        store.close().unwrap();
    }
}
