//! Rule-table driven field validation
//!
//! Each entity declares a [`RuleTable`]: an ordered list of fields, each with
//! the rules its value must satisfy. Validation is fail-fast: the first rule
//! violated (in table order, then rule order) becomes the [`ValidationError`].
//!
//! Values are checked after trimming surrounding whitespace, so a
//! whitespace-only value fails [`Rule::Required`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use school_server::features::shared::validation::{validate_record, STUDENT_RULES};
//!
//! validate_record(STUDENT_RULES, |field| match field {
//!     "name" => Some("Ana Silva"),
//!     _ => None,
//! })?; // Err: "birthDate is required"
//! ```

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Calendar date format accepted on input and produced on output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is a valid regex"));

/// Validation failure for a single field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Wire name of the offending field, if the failure is tied to one
    pub field: Option<&'static str>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    /// An update request that supplied none of the updatable fields
    pub fn no_fields() -> Self {
        Self {
            field: None,
            message: "At least one field must be provided for update".to_string(),
        }
    }
}

/// A single predicate a field value must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present and not blank
    Required,
    /// Length in characters, inclusive bounds
    Length { min: usize, max: usize },
    /// A calendar date in [`DATE_FORMAT`]
    Date,
    /// Email address syntax
    Email,
}

impl Rule {
    fn check(&self, field: &'static str, value: &str) -> Result<(), ValidationError> {
        let ok = match *self {
            Rule::Required => !value.is_empty(),
            Rule::Length { min, max } => (min..=max).contains(&value.chars().count()),
            Rule::Date => parse_date(value).is_some(),
            Rule::Email => is_valid_email(value),
        };

        if ok {
            Ok(())
        } else {
            Err(ValidationError::new(field, self.message(field)))
        }
    }

    fn message(&self, field: &str) -> String {
        match *self {
            Rule::Required => format!("{} is required", field),
            Rule::Length { min, max } => {
                format!("{} must be between {} and {} characters", field, min, max)
            },
            Rule::Date => format!("{} must be a valid date in the format YYYY-MM-DD", field),
            Rule::Email => format!("{} must be a valid email address", field),
        }
    }
}

/// Rules for one field
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

/// Ordered rules for every validated field of an entity
pub type RuleTable = &'static [FieldRules];

const fn field(field: &'static str, rules: &'static [Rule]) -> FieldRules {
    FieldRules { field, rules }
}

pub const STUDENT_RULES: RuleTable = &[
    field("name", &[Rule::Required, Rule::Length { min: 2, max: 255 }]),
    field("birthDate", &[Rule::Required, Rule::Date]),
    field("phone", &[Rule::Required, Rule::Length { min: 1, max: 18 }]),
    field("email", &[Rule::Required, Rule::Email]),
    field("enrollmentNumber", &[Rule::Required, Rule::Length { min: 1, max: 12 }]),
];

pub const TEACHER_RULES: RuleTable = &[
    field("name", &[Rule::Required, Rule::Length { min: 2, max: 100 }]),
    field("birthDate", &[Rule::Required, Rule::Date]),
    field("phone", &[Rule::Required, Rule::Length { min: 1, max: 18 }]),
    field("email", &[Rule::Required, Rule::Email]),
];

pub const CLASS_RULES: RuleTable = &[
    field("classCode", &[Rule::Required]),
    field("shift", &[Rule::Required]),
    field("subject", &[Rule::Required]),
];

/// Validate every field of `table`, treating a missing value as blank
///
/// Used by create commands, where each field in the table is mandatory.
pub fn validate_record<'a, F>(table: RuleTable, value_of: F) -> Result<(), ValidationError>
where
    F: Fn(&str) -> Option<&'a str>,
{
    for entry in table {
        let value = value_of(entry.field).map(str::trim).unwrap_or_default();
        check_field(entry, value)?;
    }
    Ok(())
}

/// Validate only the fields for which `value_of` returns a value
///
/// Used by update commands. Fails with [`ValidationError::no_fields`] when
/// nothing in the table was supplied and `other_fields_supplied` is false.
pub fn validate_supplied<'a, F>(
    table: RuleTable,
    value_of: F,
    other_fields_supplied: bool,
) -> Result<(), ValidationError>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut supplied = other_fields_supplied;
    for entry in table {
        if let Some(value) = value_of(entry.field) {
            supplied = true;
            check_field(entry, value.trim())?;
        }
    }

    if supplied {
        Ok(())
    } else {
        Err(ValidationError::no_fields())
    }
}

fn check_field(entry: &FieldRules, value: &str) -> Result<(), ValidationError> {
    entry
        .rules
        .iter()
        .try_for_each(|rule| rule.check(entry.field, value))
}

/// Parse a `YYYY-MM-DD` calendar date
///
/// Exactly four year digits and two digits each for month and day. Year zero
/// is not a calendar year.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !DATE_PATTERN.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() > 0)
}

/// Parse a date belonging to `field`, reporting failures as a [`ValidationError`]
pub fn require_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    parse_date(value).ok_or_else(|| ValidationError::new(field, Rule::Date.message(field)))
}

#[inline]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Trim an optional input value into the normalized stored form
pub fn normalize(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// The trimmed supplied value of an update, or the stored one when absent
pub fn merged(supplied: Option<&str>, stored: String) -> String {
    supplied.map(|s| s.trim().to_string()).unwrap_or(stored)
}
