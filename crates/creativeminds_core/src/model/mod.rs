//! Domain records for project management.
//!
//! # Responsibility
//! - Define the canonical record graph: projects own their resources, tasks,
//!   KPIs, ideas and feedback.
//! - Keep relations explicit: owned `Vec`s for one-to-many, id lists for
//!   many-to-many links to employees.
//!
//! # Invariants
//! - Every record is identified by a stable `Uuid`.
//! - Owned children carry a back-reference id to their parent, resolved by
//!   lookup rather than shared pointers.
//! - Derived fields (`total_cost`, `progress`, `score`, ...) are written only
//!   by `crate::compute`.

pub mod employee;
pub mod feedback;
pub mod idea;
pub mod project;
pub mod task;

use uuid::Uuid;

/// Identifier of a [`project::Project`].
pub type ProjectId = Uuid;
/// Identifier of an [`employee::Employee`].
pub type EmployeeId = Uuid;
/// Identifier of a [`project::Resource`].
pub type ResourceId = Uuid;
/// Identifier of a [`task::Task`].
pub type TaskId = Uuid;
/// Identifier of a [`project::Kpi`].
pub type KpiId = Uuid;
/// Identifier of an [`employee::Team`].
pub type TeamId = Uuid;
/// Identifier of an [`idea::Idea`].
pub type IdeaId = Uuid;
/// Identifier of an [`idea::Vote`].
pub type VoteId = Uuid;
/// Identifier of a [`feedback::Feedback`] entry.
pub type FeedbackId = Uuid;
/// Identifier of a [`feedback::FeedbackAction`].
pub type ActionId = Uuid;
/// Identifier of a [`feedback::Attachment`].
pub type AttachmentId = Uuid;

/// Returns `true` when an optional free-text field holds non-blank text.
pub(crate) fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}
