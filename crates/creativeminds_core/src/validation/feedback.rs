use crate::model::feedback::FeedbackAction;
use crate::validation::ValidationError;
use chrono::NaiveDate;

/// Feedback action rule: a due date, when set, must not be before `today`.
pub fn validate_action_due_date(action: &FeedbackAction, today: NaiveDate) -> Vec<ValidationError> {
    match action.due_date {
        Some(due_date) if due_date < today => {
            vec![ValidationError::DueDateInPast { due_date, today }]
        }
        _ => Vec::new(),
    }
}
