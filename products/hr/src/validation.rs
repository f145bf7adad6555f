use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::EmployeeDraft;

pub const FIRST_NAME: &str = "first_name";
pub const SECOND_NAME: &str = "second_name";
pub const HIRING_DATE: &str = "hiring_date";
pub const SPECIALIZATION: &str = "specialization";

/// The only accepted textual date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_SPECIALIZATION_LEN: usize = 200;

/// Raw form submission: field name to submitted text.
pub type RawForm = HashMap<String, String>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{value:?} is not a valid date in YYYY-MM-DD format")]
pub struct DateError {
    pub value: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field}: {source}")]
    InvalidDate {
        field: &'static str,
        #[source]
        source: DateError,
    },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::InvalidDate { field, .. } => field,
            ValidationError::TooLong { field, .. } => field,
        }
    }
}

/// Parse a `YYYY-MM-DD` date. Anything with another shape, including
/// unpadded months or days, and any impossible calendar date is rejected.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    let invalid = || DateError {
        value: text.to_string(),
    };
    if !has_iso_shape(text) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())
}

fn has_iso_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Field value trimmed; absent or blank fields fail.
pub fn require_nonempty(form: &RawForm, field: &'static str) -> Result<String, ValidationError> {
    let value = require_present(form, field)?;
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

/// Field value trimmed; only an absent field fails.
pub fn require_present(form: &RawForm, field: &'static str) -> Result<String, ValidationError> {
    form.get(field)
        .map(|value| value.trim().to_string())
        .ok_or(ValidationError::MissingField(field))
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Validate a create or edit submission. Both operations go through here so
/// neither gets looser rules than the other.
pub fn validate_employee_form(form: &RawForm) -> Result<EmployeeDraft, ValidationError> {
    let first_name = require_nonempty(form, FIRST_NAME)?;
    check_len(FIRST_NAME, &first_name, MAX_NAME_LEN)?;

    let second_name = require_nonempty(form, SECOND_NAME)?;
    check_len(SECOND_NAME, &second_name, MAX_NAME_LEN)?;

    require_nonempty(form, HIRING_DATE)?;
    let raw_date = form.get(HIRING_DATE).map(String::as_str).unwrap_or_default();
    let hiring_date = parse_date(raw_date).map_err(|source| ValidationError::InvalidDate {
        field: HIRING_DATE,
        source,
    })?;

    let specialization = require_present(form, SPECIALIZATION)?;
    check_len(SPECIALIZATION, &specialization, MAX_SPECIALIZATION_LEN)?;

    Ok(EmployeeDraft {
        first_name,
        second_name,
        hiring_date,
        specialization,
    })
}
