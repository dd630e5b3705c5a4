//! Business-rule validation.
//!
//! # Responsibility
//! - Evaluate independent predicates against a record and its owned children.
//! - Collect every violation of one batch instead of stopping at the first.
//!
//! # Invariants
//! - Each rule maps to exactly one `ValidationError` variant.
//! - A batch with at least one violation blocks the triggering write.
//! - Rules are pure; the current date is passed in, never read from the system.

mod employee;
mod feedback;
mod project;
mod task;
mod team;

pub use employee::{age_in_years, is_valid_national_id, validate_employee, MIN_EMPLOYEE_AGE};
pub use feedback::validate_action_due_date;
pub use project::{
    required_budget, validate_project, BUDGET_PER_RESOURCE, BUDGET_PER_TASK,
    MIN_DESCRIPTION_CHARS,
};
pub use task::validate_task;
pub use team::validate_team;

use crate::model::project::ProjectStatus;
use crate::model::EmployeeId;
use chrono::NaiveDate;
use std::collections::HashSet;

/// One violated business rule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("hourly cost ({hourly_cost}) and assigned hours ({assigned_hours}) must not be negative")]
    NegativeCostOrHours { hourly_cost: f64, assigned_hours: f64 },
    #[error("a responsible employee must be assigned once the project leaves planning")]
    MissingResponsible,
    #[error("total resource cost ({resource_cost}) exceeds the estimated budget ({budget})")]
    ResourceCostExceedsBudget { resource_cost: f64, budget: f64 },
    #[error("estimated budget must be greater than zero, got {budget}")]
    NonPositiveBudget { budget: f64 },
    #[error("budget ({budget}) is insufficient; at least {required:.2} is required to cover resources and tasks")]
    InsufficientBudget { budget: f64, required: f64 },
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("description must have at least {min} characters, got {actual}")]
    DescriptionTooShort { min: usize, actual: usize },
    #[error("a client is required for projects in status `{}`", .status.as_str())]
    MissingClient { status: ProjectStatus },
    #[error("high priority projects must define their risks")]
    MissingRisks,
    #[error("high priority projects must define their milestones")]
    MissingMilestones,
    #[error("at least one resource must be assigned before starting the project")]
    MissingResources,
    #[error("a start date is required before starting the project")]
    MissingStartDate,
    #[error("an end date is required before starting the project")]
    MissingEndDate,
    #[error("at least one task is required before starting the project")]
    MissingTasks,
    #[error("task `{task}` has start date {start} after its end date {end}")]
    InvalidTaskDateRange {
        task: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("task `{task}` starts on {task_start}, before the project start {project_start}")]
    TaskStartsBeforeProject {
        task: String,
        task_start: NaiveDate,
        project_start: NaiveDate,
    },
    #[error("task `{task}` ends on {task_end}, after the project end {project_end}")]
    TaskEndsAfterProject {
        task: String,
        task_end: NaiveDate,
        project_end: NaiveDate,
    },
    #[error("national ID `{value}` must be eight digits followed by one letter")]
    InvalidNationalId { value: String },
    #[error("national ID `{value}` is already registered")]
    DuplicateNationalId { value: String },
    #[error("birth date {birth_date} is in the future")]
    BirthDateInFuture { birth_date: NaiveDate },
    #[error("employee must be at least {min} years old, got {age}")]
    TooYoung { age: i32, min: i32 },
    #[error("due date {due_date} is before today ({today})")]
    DueDateInPast { due_date: NaiveDate, today: NaiveDate },
    #[error("employee {employee_id} is assigned more than once to {owner}")]
    RepeatedEmployee {
        owner: String,
        employee_id: EmployeeId,
    },
}

/// One `RepeatedEmployee` per id that appears more than once in `ids`.
pub(crate) fn repeated_employee_errors(owner: &str, ids: &[EmployeeId]) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    ids.iter()
        .filter(|id| !seen.insert(**id) && reported.insert(**id))
        .map(|id| ValidationError::RepeatedEmployee {
            owner: owner.to_string(),
            employee_id: *id,
        })
        .collect()
}

/// The single "validation failed" error kind, carrying every violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailed {
    pub errors: Vec<ValidationError>,
}

impl ValidationFailed {
    /// Turns a batch of violations into a result: `Ok` when empty.
    pub fn check(errors: Vec<ValidationError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    pub fn contains(&self, predicate: impl Fn(&ValidationError) -> bool) -> bool {
        self.errors.iter().any(predicate)
    }
}

impl From<ValidationError> for ValidationFailed {
    fn from(value: ValidationError) -> Self {
        Self {
            errors: vec![value],
        }
    }
}

impl std::fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: ")?;
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailed {}

#[cfg(test)]
mod tests {
    use super::{ValidationError, ValidationFailed};

    #[test]
    fn check_passes_empty_batch() {
        assert!(ValidationFailed::check(Vec::new()).is_ok());
    }

    #[test]
    fn display_joins_every_message() {
        let err = ValidationFailed::check(vec![
            ValidationError::MissingRisks,
            ValidationError::MissingMilestones,
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation failed: high priority projects must define their risks; \
             high priority projects must define their milestones"
        );
    }
}
