use crate::model::task::Task;
use crate::validation::ValidationError;

/// Task rules: start date must not be after end date.
pub fn validate_task(task: &Task) -> Vec<ValidationError> {
    match (task.start_date, task.end_date) {
        (Some(start), Some(end)) if start > end => vec![ValidationError::InvalidTaskDateRange {
            task: task.name.clone(),
            start,
            end,
        }],
        _ => Vec::new(),
    }
}
