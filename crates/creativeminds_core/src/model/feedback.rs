//! Client feedback, follow-up actions and file attachments.

use crate::model::{ActionId, AttachmentId, EmployeeId, FeedbackId, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Feedback urgency, from a mere suggestion up to critical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackPriority {
    Suggestion,
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl FeedbackPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Suggestion => "suggestion",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "suggestion" => Some(Self::Suggestion),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Follow-up action state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// What an attachment documents. Feedback attachments are always `Additional`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Documentation,
    #[default]
    Additional,
}

impl AttachmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Documentation => "documentation",
            Self::Additional => "additional",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(Self::Image),
            "documentation" => Some(Self::Documentation),
            "additional" => Some(Self::Additional),
            _ => None,
        }
    }
}

/// Binary blob plus its original file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub kind: AttachmentKind,
    pub file_name: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(kind: AttachmentKind, file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            file_name: file_name.into(),
            data,
        }
    }

    /// Copy of the blob under a fresh identity.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}

/// Corrective action derived from a feedback entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAction {
    pub id: ActionId,
    pub feedback_id: FeedbackId,
    pub description: String,
    pub assignee_id: Option<EmployeeId>,
    /// Must not be in the past when set or changed.
    pub due_date: Option<NaiveDate>,
    pub status: ActionStatus,
}

impl FeedbackAction {
    pub fn new(feedback_id: FeedbackId, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            feedback_id,
            description: description.into(),
            assignee_id: None,
            due_date: None,
            status: ActionStatus::Pending,
        }
    }
}

/// Client feedback entry for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub project_id: ProjectId,
    pub date: NaiveDate,
    pub client: Option<String>,
    pub text: String,
    pub positive_points: Option<String>,
    pub improvement_points: Option<String>,
    pub priority: FeedbackPriority,
    pub actions: Vec<FeedbackAction>,
    pub attachments: Vec<Attachment>,
}

impl Feedback {
    pub fn new(project_id: ProjectId, date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            date,
            client: None,
            text: text.into(),
            positive_points: None,
            improvement_points: None,
            priority: FeedbackPriority::Low,
            actions: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Attaches an action and returns its id.
    pub fn add_action(&mut self, mut action: FeedbackAction) -> ActionId {
        action.feedback_id = self.id;
        let id = action.id;
        self.actions.push(action);
        id
    }

    pub fn action(&self, id: ActionId) -> Option<&FeedbackAction> {
        self.actions.iter().find(|action| action.id == id)
    }

    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut FeedbackAction> {
        self.actions.iter_mut().find(|action| action.id == id)
    }

    /// Deep copy with fresh identities for the entry, its actions and attachments.
    pub fn duplicate_for(&self, project_id: ProjectId) -> Self {
        let id = Uuid::new_v4();
        let actions = self
            .actions
            .iter()
            .map(|action| FeedbackAction {
                id: Uuid::new_v4(),
                feedback_id: id,
                ..action.clone()
            })
            .collect();
        let attachments = self.attachments.iter().map(Attachment::duplicate).collect();
        Self {
            id,
            project_id,
            actions,
            attachments,
            ..self.clone()
        }
    }
}
