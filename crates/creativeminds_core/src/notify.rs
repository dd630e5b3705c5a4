//! Outbound messaging seam.
//!
//! # Responsibility
//! - Address messages and follow-up activities to an employee's contact identity.
//! - Keep delivery mechanics outside core.
//!
//! # Invariants
//! - Notification failures never roll back the record write that triggered them;
//!   services log and continue.

use crate::model::employee::Employee;
use crate::model::EmployeeId;
use log::info;

/// Delivery target derived from an employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub employee_id: EmployeeId,
    pub name: String,
    pub contact: String,
}

impl From<&Employee> for Recipient {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id,
            name: employee.name.clone(),
            contact: employee.contact.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Messaging collaborator.
pub trait Notifier {
    /// Posts a message addressed to `recipient`.
    fn post_message(&self, recipient: &Recipient, subject: &str, body: &str)
        -> Result<(), NotifyError>;

    /// Creates a follow-up to-do activity assigned to `recipient`.
    fn schedule_activity(
        &self,
        recipient: &Recipient,
        summary: &str,
        note: &str,
    ) -> Result<(), NotifyError>;
}

/// Notifier that only records dispatches in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn post_message(
        &self,
        recipient: &Recipient,
        subject: &str,
        _body: &str,
    ) -> Result<(), NotifyError> {
        info!(
            "event=message_post module=notify status=ok recipient={} subject_len={}",
            recipient.contact,
            subject.chars().count()
        );
        Ok(())
    }

    fn schedule_activity(
        &self,
        recipient: &Recipient,
        summary: &str,
        _note: &str,
    ) -> Result<(), NotifyError> {
        info!(
            "event=activity_schedule module=notify status=ok recipient={} summary_len={}",
            recipient.contact,
            summary.chars().count()
        );
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn post_message(
        &self,
        recipient: &Recipient,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError> {
        (**self).post_message(recipient, subject, body)
    }

    fn schedule_activity(
        &self,
        recipient: &Recipient,
        summary: &str,
        note: &str,
    ) -> Result<(), NotifyError> {
        (**self).schedule_activity(recipient, summary, note)
    }
}
