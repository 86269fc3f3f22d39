//! Author form validation pipeline.
//!
//! # Responsibility
//! - Turn raw submitted form strings into a normalized `AuthorDraft`.
//! - Report every rule violation, in declaration order, when input is invalid.
//!
//! # Invariants
//! - Rules are a static ordered table; every rule runs, none short-circuits.
//! - Empty input only violates `Required`.
//! - `first_name` is trimmed and HTML-escaped in the normalized output.

mod rules;

pub use rules::{escape_html, parse_iso_date};

use crate::model::author::AuthorDraft;
use rules::{FieldRule, AUTHOR_RULES};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw author form submission.
///
/// Missing fields deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorForm {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

/// Category of a single field violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Value is empty after trimming.
    Required,
    /// Value is present but malformed.
    Format,
}

/// One rule violation for one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
    #[serde(rename = "msg")]
    pub message: &'static str,
    /// The submitted value the rule looked at.
    pub value: String,
}

/// Non-empty ordered list of field violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .0
            .iter()
            .map(|err| format!("{}: {}", err.field, err.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid author form: {fields}")
    }
}

impl Error for ValidationErrors {}

/// Validates and normalizes an author form.
///
/// # Errors
/// Returns every violated rule from the author rule table, in table order.
pub fn validate_author_form(form: &AuthorForm) -> Result<AuthorDraft, ValidationErrors> {
    let mut errors = Vec::new();

    for check in AUTHOR_RULES {
        let raw = field_value(form, check.field);
        let subject = raw.trim();
        let passed = match check.rule {
            FieldRule::Required => !subject.is_empty(),
            FieldRule::Alphanumeric => rules::is_alphanumeric(subject),
            FieldRule::OptionalIsoDate => subject.is_empty() || parse_iso_date(subject).is_some(),
        };

        if !passed {
            errors.push(FieldError {
                field: check.field,
                kind: check.rule.error_kind(),
                message: check.message,
                value: raw.to_string(),
            });
        }
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(AuthorDraft {
        first_name: escape_html(form.first_name.trim()),
        family_name: form.family_name.clone(),
        date_of_birth: optional_date(&form.date_of_birth),
        date_of_death: optional_date(&form.date_of_death),
    })
}

fn field_value<'a>(form: &'a AuthorForm, field: &str) -> &'a str {
    match field {
        "first_name" => &form.first_name,
        "family_name" => &form.family_name,
        "date_of_birth" => &form.date_of_birth,
        "date_of_death" => &form.date_of_death,
        _ => "",
    }
}

fn optional_date(raw: &str) -> Option<chrono::NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_iso_date(trimmed)
}
