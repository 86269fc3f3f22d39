//! Declarative author rule table and the primitive checks behind it.

use super::FieldErrorKind;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static ALPHANUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]*$").expect("valid alphanumeric regex"));

// Optional time of day with an optional `Z` or numeric offset.
const ISO_TIME: &str =
    r"(?:[T ](?:[01][0-9]|2[0-3])(?::?[0-5][0-9](?::?[0-5][0-9](?:[.,][0-9]+)?)?)?(?:[zZ]|[+-](?:[01][0-9]|2[0-3])(?::?[0-5][0-9])?)?)?";

// Extended `YYYY[-MM[-DD[time]]]` or basic `YYYYMMDD[time]`.
static ISO_8601_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?:(?P<year>[0-9]{{4}})(?:-(?P<month>0[1-9]|1[0-2])(?:-(?P<day>0[1-9]|[12][0-9]|3[01]){ISO_TIME})?)?|(?P<basic_year>[0-9]{{4}})(?P<basic_month>0[1-9]|1[0-2])(?P<basic_day>0[1-9]|[12][0-9]|3[01]){ISO_TIME})$"
    ))
    .expect("valid ISO-8601 regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FieldRule {
    Required,
    Alphanumeric,
    OptionalIsoDate,
}

impl FieldRule {
    pub(super) fn error_kind(self) -> FieldErrorKind {
        match self {
            Self::Required => FieldErrorKind::Required,
            Self::Alphanumeric | Self::OptionalIsoDate => FieldErrorKind::Format,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct FieldCheck {
    pub field: &'static str,
    pub rule: FieldRule,
    pub message: &'static str,
}

// `family_name` has no rule.
pub(super) const AUTHOR_RULES: &[FieldCheck] = &[
    FieldCheck {
        field: "first_name",
        rule: FieldRule::Required,
        message: "First name is required.",
    },
    FieldCheck {
        field: "first_name",
        rule: FieldRule::Alphanumeric,
        message: "First name has non-alphanumeric characters.",
    },
    FieldCheck {
        field: "date_of_birth",
        rule: FieldRule::OptionalIsoDate,
        message: "Invalid date of birth",
    },
    FieldCheck {
        field: "date_of_death",
        rule: FieldRule::OptionalIsoDate,
        message: "Invalid date of death",
    },
];

pub(super) fn is_alphanumeric(value: &str) -> bool {
    ALPHANUMERIC_RE.is_match(value)
}

/// Parses an ISO-8601 calendar date or date-time into its calendar date.
///
/// Accepts the extended form `YYYY-MM-DD`, the reduced forms `YYYY-MM` and
/// `YYYY`, the basic form `YYYYMMDD`, and any full date followed by a
/// `THH[:MM[:SS[.f]]]` time with an optional `Z` or `±hh[:mm]` offset.
/// Reduced forms resolve to the first day of the month or year. The time
/// part is checked but does not shift the date. Returns `None` for anything
/// else, including unpadded fields and impossible dates such as `2001-02-29`.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let caps = ISO_8601_RE.captures(value.trim())?;
    let (year, month, day) = match caps.name("year") {
        Some(year) => (year, caps.name("month"), caps.name("day")),
        None => (
            caps.name("basic_year")?,
            caps.name("basic_month"),
            caps.name("basic_day"),
        ),
    };

    let year = year.as_str().parse().ok()?;
    let month = month.map_or(Some(1), |month| month.as_str().parse().ok())?;
    let day = day.map_or(Some(1), |day| day.as_str().parse().ok())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Escapes characters with meaning in HTML markup.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_html, is_alphanumeric, parse_iso_date};
    use chrono::NaiveDate;

    #[test]
    fn escape_html_replaces_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="/x">'&'</a>"#),
            "&lt;a href=&quot;&#x2F;x&quot;&gt;&#x27;&amp;&#x27;&lt;&#x2F;a&gt;"
        );
        assert_eq!(escape_html("Jane"), "Jane");
    }

    #[test]
    fn alphanumeric_is_ascii_only() {
        assert!(is_alphanumeric("Abc123"));
        assert!(is_alphanumeric(""));
        assert!(!is_alphanumeric("é"));
        assert!(!is_alphanumeric("a b"));
    }

    #[test]
    fn parse_iso_date_accepts_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(1775, 12, 16);
        assert_eq!(parse_iso_date("1775-12-16"), expected);
        assert_eq!(parse_iso_date("1775-12-16T10:00:00+01:00"), expected);
        assert_eq!(parse_iso_date("1775-12-16T10:00"), expected);
        assert_eq!(parse_iso_date("1775-12-16T10:00:00.250"), expected);
        assert_eq!(parse_iso_date("1775-12-16T10:00Z"), expected);
        assert_eq!(parse_iso_date("17751216"), expected);
        assert_eq!(parse_iso_date("17751216T1000+0100"), expected);
    }

    #[test]
    fn parse_iso_date_resolves_reduced_forms_to_first_day() {
        assert_eq!(parse_iso_date("1775-12"), NaiveDate::from_ymd_opt(1775, 12, 1));
        assert_eq!(parse_iso_date("1775"), NaiveDate::from_ymd_opt(1775, 1, 1));
    }

    #[test]
    fn parse_iso_date_rejects_non_iso_input() {
        for input in [
            "",
            "16-12-1775",
            "1775/12/16",
            "December 16, 1775",
            "2001-02-29",
            "1775-1-6",
            "1775-12-6",
            "177512",
            "1775-13",
            "1775-12-16T25:00",
            "1775-12-16T10:00X",
            "1775-12T10:00",
        ] {
            assert_eq!(parse_iso_date(input), None, "{input:?}");
        }
    }
}
