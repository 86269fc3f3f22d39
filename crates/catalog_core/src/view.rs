//! Presentation adapter between workflow results and an external renderer.
//!
//! # Responsibility
//! - Describe what to render (template + status + view-model) or where to
//!   redirect, without rendering anything itself.
//! - Flatten domain records into serializable view-models with derived
//!   fields (`name`, `lifespan`, `url`) precomputed.
//!
//! # Invariants
//! - Form view-models echo the raw submitted strings, never the escaped ones.
//! - View-models serialize with the field names templates expect.

use crate::model::author::{format_date, Author};
use crate::model::book::{Book, BookSummary};
use crate::validation::{AuthorForm, FieldError};
use http::StatusCode;
use serde::Serialize;

pub const AUTHOR_LIST_TEMPLATE: &str = "author_list";
pub const AUTHOR_DETAIL_TEMPLATE: &str = "author_detail";
pub const AUTHOR_FORM_TEMPLATE: &str = "author_form";
pub const AUTHOR_DELETE_TEMPLATE: &str = "author_delete";

/// Outcome of one handler invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Render(View),
    Redirect { location: String },
}

impl Response {
    pub fn render(template: &'static str, context: ViewContext) -> Self {
        Self::Render(View {
            template,
            status: StatusCode::OK,
            context,
        })
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: location.into(),
        }
    }

    /// HTTP status the router should send for this outcome.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Render(view) => view.status,
            Self::Redirect { .. } => StatusCode::FOUND,
        }
    }

    pub fn view(&self) -> Option<&View> {
        match self {
            Self::Render(view) => Some(view),
            Self::Redirect { .. } => None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Render(_) => None,
            Self::Redirect { location } => Some(location),
        }
    }
}

/// A template to render with its view-model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub template: &'static str,
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub context: ViewContext,
}

fn serialize_status<S: serde::Serializer>(
    status: &StatusCode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// View-model handed to the template engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewContext {
    AuthorList {
        title: &'static str,
        author_list: Vec<AuthorView>,
    },
    AuthorDetail {
        title: &'static str,
        author: AuthorView,
        authors_books: Vec<BookView>,
    },
    AuthorForm {
        title: &'static str,
        author: Option<AuthorFormView>,
        errors: Vec<FieldError>,
    },
    AuthorDelete {
        title: &'static str,
        author: Option<AuthorView>,
        author_books: Vec<BookView>,
    },
}

impl ViewContext {
    pub fn title(&self) -> &'static str {
        match self {
            Self::AuthorList { title, .. }
            | Self::AuthorDetail { title, .. }
            | Self::AuthorForm { title, .. }
            | Self::AuthorDelete { title, .. } => title,
        }
    }
}

/// Author as shown on list, detail and delete pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorView {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: format_date(author.date_of_birth),
            date_of_death: format_date(author.date_of_death),
            name: author.name(),
            lifespan: author.lifespan(),
            url: author.url(),
        }
    }
}

/// Values shown in the author form inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorFormView {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&AuthorForm> for AuthorFormView {
    fn from(form: &AuthorForm) -> Self {
        Self {
            first_name: form.first_name.clone(),
            family_name: form.family_name.clone(),
            date_of_birth: form.date_of_birth.clone(),
            date_of_death: form.date_of_death.clone(),
        }
    }
}

impl From<&Author> for AuthorFormView {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: format_date(author.date_of_birth),
            date_of_death: format_date(author.date_of_death),
        }
    }
}

/// Book row on author detail and delete pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book.url(),
        }
    }
}

impl From<&BookSummary> for BookView {
    fn from(book: &BookSummary) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book.url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthorView, Response, ViewContext, AUTHOR_LIST_TEMPLATE};
    use crate::model::author::{Author, AuthorDraft};
    use chrono::NaiveDate;
    use http::StatusCode;
    use uuid::Uuid;

    #[test]
    fn redirect_uses_found_status() {
        let response = Response::redirect("/catalog/authors");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.location(), Some("/catalog/authors"));
        assert!(response.view().is_none());
    }

    #[test]
    fn render_serializes_for_templates() {
        let author = Author::from_draft(
            Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
            AuthorDraft {
                first_name: "Jane".to_string(),
                family_name: "Austen".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1775, 12, 16),
                date_of_death: None,
            },
        );
        let response = Response::render(
            AUTHOR_LIST_TEMPLATE,
            ViewContext::AuthorList {
                title: "Author List",
                author_list: vec![AuthorView::from(&author)],
            },
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "render");
        assert_eq!(json["template"], "author_list");
        assert_eq!(json["status"], 200);
        assert_eq!(json["context"]["title"], "Author List");
        let row = &json["context"]["author_list"][0];
        assert_eq!(row["name"], "Austen, Jane");
        assert_eq!(row["date_of_birth"], "1775-12-16");
        assert_eq!(row["date_of_death"], "");
        assert_eq!(
            row["url"],
            "/catalog/author/11111111-2222-4333-8444-555555555555"
        );
    }
}
