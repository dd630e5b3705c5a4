//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls, recompute and validation into workflows.
//! - Dispatch notifications after successful writes.
//!
//! # Invariants
//! - Every write recomputes derived fields before validating.
//! - A notification failure is logged and never fails the write that caused it.

pub mod employee_service;
pub mod metrics_service;
pub mod project_service;

use crate::model::{ActionId, EmployeeId, FeedbackId, ProjectId};
use crate::notify::{Notifier, Recipient};
use crate::repo::RepoError;
use crate::validation::ValidationFailed;
use log::{error, warn};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for project and employee use-cases.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("a responsible employee is required to create a project")]
    MissingResponsible,
    #[error("unknown employee: {0}")]
    UnknownEmployee(EmployeeId),
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),
    #[error("feedback not found: {0}")]
    FeedbackNotFound(FeedbackId),
    #[error("feedback action not found: {0}")]
    ActionNotFound(ActionId),
    #[error(transparent)]
    Validation(ValidationFailed),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(failed) => Self::Validation(failed),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationFailed> for ServiceError {
    fn from(value: ValidationFailed) -> Self {
        Self::Validation(value)
    }
}

/// Logs a rejected write; validation rejections only carry the error count.
pub(crate) fn log_rejection(event: &str, module: &str, err: &ServiceError) {
    match err {
        ServiceError::Validation(failed) => warn!(
            "event={event} module={module} status=error error_code=validation_failed error_count={}",
            failed.errors.len()
        ),
        other => error!("event={event} module={module} status=error error={other}"),
    }
}

/// Posts a message, logging delivery failures instead of returning them.
pub(crate) fn post_or_log(notifier: &impl Notifier, recipient: &Recipient, subject: &str, body: &str) {
    if let Err(err) = notifier.post_message(recipient, subject, body) {
        warn!(
            "event=notify module=service status=error kind=message employee_id={} error={err}",
            recipient.employee_id
        );
    }
}

/// Schedules an activity, logging delivery failures instead of returning them.
pub(crate) fn schedule_or_log(
    notifier: &impl Notifier,
    recipient: &Recipient,
    summary: &str,
    note: &str,
) {
    if let Err(err) = notifier.schedule_activity(recipient, summary, note) {
        warn!(
            "event=notify module=service status=error kind=activity employee_id={} error={err}",
            recipient.employee_id
        );
    }
}
