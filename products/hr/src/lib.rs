//! HR module: the employee payload handlers pass to the store, and the
//! validation that produces it from raw form fields.

mod validation;

use chrono::{Local, NaiveDate};

pub use validation::{
    DATE_FORMAT, DateError, FIRST_NAME, HIRING_DATE, MAX_NAME_LEN, MAX_SPECIALIZATION_LEN,
    RawForm, SECOND_NAME, SPECIALIZATION, ValidationError, parse_date, require_nonempty,
    require_present, validate_employee_form,
};

/// A validated employee payload. Carries every business field of a record
/// but no id; the store assigns that on insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub second_name: String,
    pub hiring_date: NaiveDate,
    pub specialization: String,
}

impl EmployeeDraft {
    pub fn new(
        first_name: impl Into<String>,
        second_name: impl Into<String>,
        hiring_date: NaiveDate,
        specialization: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            second_name: second_name.into(),
            hiring_date,
            specialization: specialization.into(),
        }
    }

    /// Draft for someone starting today. The date is read from the clock on
    /// every call.
    pub fn hired_today(
        first_name: impl Into<String>,
        second_name: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Self {
        Self::new(first_name, second_name, today(), specialization)
    }
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
