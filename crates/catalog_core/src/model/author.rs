//! Author domain model.
//!
//! # Responsibility
//! - Define the persisted Author record and its mutable-field draft.
//! - Provide derived projections (display name, lifespan, canonical URL).
//!
//! # Invariants
//! - `id` is assigned by the store and never changes for a record.
//! - `first_name` is trimmed, non-empty and alphanumeric when written through
//!   the author workflow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an author record.
pub type AuthorId = Uuid;

/// URL of the author list page.
pub const AUTHOR_LIST_URL: &str = "/catalog/authors";

const AUTHOR_URL_PREFIX: &str = "/catalog/author/";

/// Canonical persisted author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Mutable author fields without an identity.
///
/// Used both as the create payload (store assigns the id) and as the
/// full-replacement payload for updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Builds a record from a draft and an already assigned id.
    pub fn from_draft(id: AuthorId, draft: AuthorDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            family_name: draft.family_name,
            date_of_birth: draft.date_of_birth,
            date_of_death: draft.date_of_death,
        }
    }

    /// Display name in `family, first` form.
    ///
    /// Returns an empty string when either name part is missing.
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Lifespan rendered as `birth - death` with ISO dates.
    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        format!(
            "{} - {}",
            format_date(self.date_of_birth),
            format_date(self.date_of_death)
        )
    }

    /// Canonical URL of this author.
    pub fn url(&self) -> String {
        author_url(self.id)
    }
}

/// Canonical URL for an author id.
pub fn author_url(id: AuthorId) -> String {
    format!("{AUTHOR_URL_PREFIX}{id}")
}

/// Formats an optional date as `YYYY-MM-DD`, or empty when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
