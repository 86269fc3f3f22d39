//! Author request workflows.
//!
//! # Responsibility
//! - Orchestrate fetch, validate, dependency check and persist steps for the
//!   author list, detail, create, update and delete use cases.
//! - Map outcomes to views or redirects; hold no state across requests.
//!
//! # Invariants
//! - Validation failures never leave this module; they become a 200 re-render.
//! - A missing author is a 404 on detail and update, a redirect to the list
//!   on delete.
//! - Store errors are propagated unmodified and never retried.
//! - An author with at least one book is never deleted here.

use crate::error::{WorkflowError, WorkflowResult};
use crate::model::author::{Author, AuthorId, AUTHOR_LIST_URL};
use crate::repo::author_repo::AuthorStore;
use crate::repo::book_repo::BookStore;
use crate::validation::{validate_author_form, AuthorForm, FieldError};
use crate::view::{
    AuthorFormView, AuthorView, BookView, Response, ViewContext, AUTHOR_DELETE_TEMPLATE,
    AUTHOR_DETAIL_TEMPLATE, AUTHOR_FORM_TEMPLATE, AUTHOR_LIST_TEMPLATE,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const LIST_TITLE: &str = "Author List";
const DETAIL_TITLE: &str = "Author Detail";
const CREATE_TITLE: &str = "Create Author";
const UPDATE_TITLE: &str = "Update Author";
const DELETE_TITLE: &str = "Delete Author";

/// Body of the delete confirmation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorDeleteForm {
    pub authorid: String,
}

/// Author use-case handlers over an author store and a book store.
pub struct AuthorWorkflow<A: AuthorStore, B: BookStore> {
    authors: A,
    books: B,
}

impl<A: AuthorStore, B: BookStore> AuthorWorkflow<A, B> {
    pub fn new(authors: A, books: B) -> Self {
        Self { authors, books }
    }

    /// GET author list, sorted by family name.
    pub async fn author_list(&self) -> WorkflowResult<Response> {
        let authors = self.authors.list_authors().await?;
        info!(
            "event=author_list module=workflow status=ok count={}",
            authors.len()
        );

        Ok(Response::render(
            AUTHOR_LIST_TEMPLATE,
            ViewContext::AuthorList {
                title: LIST_TITLE,
                author_list: authors.iter().map(AuthorView::from).collect(),
            },
        ))
    }

    /// GET one author with the books they wrote.
    ///
    /// # Errors
    /// - `WorkflowError::NotFound` when the author does not exist, whatever
    ///   the book query returned.
    /// - `WorkflowError::Store` when the author query fails, or when the
    ///   book query fails for an existing author.
    pub async fn author_detail(&self, id: &str) -> WorkflowResult<Response> {
        let Some(author_id) = parse_id(id) else {
            info!("event=author_detail module=workflow status=not_found reason=malformed_id");
            return Err(WorkflowError::not_found(id));
        };

        // Both lookups finish before either result is inspected; a missing
        // author wins over a failed book query.
        let (author, books) = tokio::join!(
            self.authors.find_author(author_id),
            self.books.list_book_summaries_by_author(author_id),
        );

        let Some(author) = author? else {
            info!("event=author_detail module=workflow status=not_found id={author_id}");
            return Err(WorkflowError::not_found(id));
        };
        let books = books?;

        info!(
            "event=author_detail module=workflow status=ok id={} books={}",
            author_id,
            books.len()
        );
        Ok(Response::render(
            AUTHOR_DETAIL_TEMPLATE,
            ViewContext::AuthorDetail {
                title: DETAIL_TITLE,
                author: AuthorView::from(&author),
                authors_books: books.iter().map(BookView::from).collect(),
            },
        ))
    }

    /// GET blank create form.
    pub fn author_create_get(&self) -> Response {
        form_response(CREATE_TITLE, None, Vec::new())
    }

    /// POST create form.
    ///
    /// Invalid input re-renders the form with the submitted values; valid
    /// input is persisted and redirects to the new author's page. Every
    /// accepted submission creates a new record.
    pub async fn author_create_post(&self, form: &AuthorForm) -> WorkflowResult<Response> {
        let draft = match validate_author_form(form) {
            Ok(draft) => draft,
            Err(errors) => {
                info!(
                    "event=author_create module=workflow status=invalid errors={}",
                    errors.len()
                );
                return Ok(form_response(
                    CREATE_TITLE,
                    Some(AuthorFormView::from(form)),
                    errors.into_errors(),
                ));
            }
        };

        let author = self.authors.create_author(&draft).await?;
        info!("event=author_create module=workflow status=ok id={}", author.id);
        Ok(Response::redirect(author.url()))
    }

    /// GET delete confirmation page.
    ///
    /// A missing author redirects to the list.
    pub async fn author_delete_get(&self, id: &str) -> WorkflowResult<Response> {
        let Some(author_id) = parse_id(id) else {
            info!("event=author_delete_view module=workflow status=missing reason=malformed_id");
            return Ok(Response::redirect(AUTHOR_LIST_URL));
        };

        let (author, books) = tokio::try_join!(
            self.authors.find_author(author_id),
            self.books.list_books_by_author(author_id),
        )?;

        let Some(author) = author else {
            info!("event=author_delete_view module=workflow status=missing id={author_id}");
            return Ok(Response::redirect(AUTHOR_LIST_URL));
        };

        info!(
            "event=author_delete_view module=workflow status=ok id={} books={}",
            author_id,
            books.len()
        );
        Ok(delete_response(Some(&author), books.iter().map(BookView::from).collect()))
    }

    /// POST delete confirmation.
    ///
    /// The target is the submitted `authorid`, not `path_id`; a mismatch is
    /// logged. Authors with books are kept and the confirmation page is
    /// shown again. Deleting an id that does not exist redirects like a
    /// successful delete.
    pub async fn author_delete_post(
        &self,
        path_id: &str,
        form: &AuthorDeleteForm,
    ) -> WorkflowResult<Response> {
        if form.authorid != path_id {
            warn!(
                "event=author_delete module=workflow status=id_mismatch path_id={} form_id={}",
                path_id, form.authorid
            );
        }

        let Some(author_id) = parse_id(&form.authorid) else {
            info!("event=author_delete module=workflow status=noop reason=malformed_id");
            return Ok(Response::redirect(AUTHOR_LIST_URL));
        };

        let (author, books) = tokio::try_join!(
            self.authors.find_author(author_id),
            self.books.list_books_by_author(author_id),
        )?;

        if !books.is_empty() {
            info!(
                "event=author_delete module=workflow status=blocked id={} books={}",
                author_id,
                books.len()
            );
            return Ok(delete_response(
                author.as_ref(),
                books.iter().map(BookView::from).collect(),
            ));
        }

        let removed = self.authors.delete_author(author_id).await?;
        info!("event=author_delete module=workflow status=ok id={author_id} removed={removed}");
        Ok(Response::redirect(AUTHOR_LIST_URL))
    }

    /// GET update form pre-filled with the stored author.
    ///
    /// # Errors
    /// - `WorkflowError::NotFound` when the author does not exist.
    pub async fn author_update_get(&self, id: &str) -> WorkflowResult<Response> {
        let author = match parse_id(id) {
            Some(author_id) => self.authors.find_author(author_id).await?,
            None => None,
        };

        let Some(author) = author else {
            info!("event=author_update_view module=workflow status=not_found");
            return Err(WorkflowError::not_found(id));
        };

        Ok(form_response(
            UPDATE_TITLE,
            Some(AuthorFormView::from(&author)),
            Vec::new(),
        ))
    }

    /// POST update form; replaces every mutable field of author `id`.
    ///
    /// # Errors
    /// - `WorkflowError::NotFound` when the author does not exist.
    pub async fn author_update_post(
        &self,
        id: &str,
        form: &AuthorForm,
    ) -> WorkflowResult<Response> {
        let draft = match validate_author_form(form) {
            Ok(draft) => draft,
            Err(errors) => {
                info!(
                    "event=author_update module=workflow status=invalid errors={}",
                    errors.len()
                );
                return Ok(form_response(
                    UPDATE_TITLE,
                    Some(AuthorFormView::from(form)),
                    errors.into_errors(),
                ));
            }
        };

        let Some(author_id) = parse_id(id) else {
            return Err(WorkflowError::not_found(id));
        };

        let updated = self
            .authors
            .update_author(&Author::from_draft(author_id, draft))
            .await?;
        info!("event=author_update module=workflow status=ok id={}", updated.id);
        Ok(Response::redirect(updated.url()))
    }
}

// Ids that are not UUIDs cannot name a stored author.
fn parse_id(raw: &str) -> Option<AuthorId> {
    Uuid::parse_str(raw.trim()).ok()
}

fn form_response(
    title: &'static str,
    author: Option<AuthorFormView>,
    errors: Vec<FieldError>,
) -> Response {
    Response::render(
        AUTHOR_FORM_TEMPLATE,
        ViewContext::AuthorForm {
            title,
            author,
            errors,
        },
    )
}

fn delete_response(author: Option<&Author>, author_books: Vec<BookView>) -> Response {
    Response::render(
        AUTHOR_DELETE_TEMPLATE,
        ViewContext::AuthorDelete {
            title: DELETE_TITLE,
            author: author.map(AuthorView::from),
            author_books,
        },
    )
}
