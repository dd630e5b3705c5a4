use crate::model::employee::Employee;
use crate::validation::ValidationError;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum working age in whole years.
pub const MIN_EMPLOYEE_AGE: i32 = 16;

static NATIONAL_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}[A-Za-z]$").expect("valid national id regex"));

/// Eight ASCII digits followed by one letter, case-insensitive.
pub fn is_valid_national_id(value: &str) -> bool {
    NATIONAL_ID_RE.is_match(value)
}

/// Whole years between `birth_date` and `today` (negative for future dates).
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Record-local employee rules: national ID format and birth date.
///
/// Uniqueness needs a repository lookup and is checked by the employee service.
pub fn validate_employee(employee: &Employee, today: NaiveDate) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_valid_national_id(&employee.national_id) {
        errors.push(ValidationError::InvalidNationalId {
            value: employee.national_id.clone(),
        });
    }

    if let Some(birth_date) = employee.birth_date {
        if birth_date > today {
            errors.push(ValidationError::BirthDateInFuture { birth_date });
        } else {
            let age = age_in_years(birth_date, today);
            if age < MIN_EMPLOYEE_AGE {
                errors.push(ValidationError::TooYoung {
                    age,
                    min: MIN_EMPLOYEE_AGE,
                });
            }
        }
    }

    errors
}
