//! Project task record.

use crate::model::{EmployeeId, ProjectId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Work is in progress.
    InProgress,
    /// Finished; counts towards project progress.
    Completed,
}

impl TaskStatus {
    /// Stable storage/wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a storage/wire value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Back-reference to the owning project.
    pub project_id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub responsible_id: Option<EmployeeId>,
    pub start_date: Option<NaiveDate>,
    /// Should be >= `start_date` when both are set.
    pub end_date: Option<NaiveDate>,
    pub status: TaskStatus,
}

impl Task {
    /// Creates a pending task for `project_id`.
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            description: None,
            responsible_id: None,
            start_date: None,
            end_date: None,
            status: TaskStatus::Pending,
        }
    }

    /// Returns a fresh-identity copy owned by `project_id`, reset to pending.
    pub fn duplicate_for(&self, project_id: ProjectId) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            status: TaskStatus::Pending,
            ..self.clone()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
