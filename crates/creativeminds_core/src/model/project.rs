//! Project record graph: projects, resources and KPIs.
//!
//! # Responsibility
//! - Define the project root record and the children only projects own.
//! - Provide attach helpers that keep child back-references consistent.
//!
//! # Invariants
//! - Children pushed through `add_*` always carry `project_id == self.id`.
//! - `total_cost`, `resource_cost` and `progress` are derived; callers must
//!   run `crate::compute::recompute_project` after mutating their inputs.

use crate::model::feedback::{Attachment, Feedback};
use crate::model::idea::Idea;
use crate::model::task::Task;
use crate::model::{EmployeeId, FeedbackId, IdeaId, KpiId, ProjectId, ResourceId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Finished,
    Stopped,
}

impl ProjectStatus {
    /// Stable storage/wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
            Self::Stopped => "stopped",
        }
    }

    /// Parses a storage/wire value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "planning" => Some(Self::Planning),
            "in_progress" => Some(Self::InProgress),
            "finished" => Some(Self::Finished),
            "stopped" => Some(Self::Stopped),
            _ => None,
        }
    }

    /// Human-readable label used in notifications and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In progress",
            Self::Finished => "Finished",
            Self::Stopped => "Stopped",
        }
    }
}

/// Project priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl ProjectPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Resource assignment state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    #[default]
    Draft,
    Assigned,
    InProgress,
    Completed,
}

impl ResourceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "assigned" => Some(Self::Assigned),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Staffing/cost line item owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub project_id: ProjectId,
    pub name: String,
    pub employee_ids: Vec<EmployeeId>,
    pub hourly_cost: f64,
    pub assigned_hours: f64,
    /// Derived: `hourly_cost * assigned_hours`.
    pub total_cost: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ResourceStatus,
}

impl Resource {
    /// Creates a draft resource with zero cost.
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            employee_ids: Vec::new(),
            hourly_cost: 0.0,
            assigned_hours: 0.0,
            total_cost: 0.0,
            start_date: None,
            end_date: None,
            status: ResourceStatus::Draft,
        }
    }

    /// Returns a fresh-identity copy owned by `project_id`, reset to draft.
    pub fn duplicate_for(&self, project_id: ProjectId) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            status: ResourceStatus::Draft,
            ..self.clone()
        }
    }
}

/// Key performance indicator tracked for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: KpiId,
    pub project_id: ProjectId,
    pub name: String,
    pub value: f64,
    pub target: f64,
}

impl Kpi {
    pub fn new(project_id: ProjectId, name: impl Into<String>, target: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            value: 0.0,
            target,
        }
    }
}

/// Root of the project record graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Employees assigned to the project (many-to-many).
    pub employee_ids: Vec<EmployeeId>,
    pub hourly_cost: f64,
    pub assigned_hours: f64,
    /// Derived: `hourly_cost * assigned_hours`.
    pub total_cost: f64,
    pub description: Option<String>,
    pub client: Option<String>,
    pub status: ProjectStatus,
    /// Derived: share of completed tasks, in percent.
    pub progress: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub priority: ProjectPriority,
    /// Required once the project leaves `Planning`.
    pub responsible_id: Option<EmployeeId>,
    pub estimated_budget: f64,
    pub resources: Vec<Resource>,
    /// Derived: sum of resource total costs.
    pub resource_cost: f64,
    pub tasks: Vec<Task>,
    pub kpis: Vec<Kpi>,
    pub ideas: Vec<Idea>,
    pub feedback: Vec<Feedback>,
    pub collaborators: Option<String>,
    pub risks: Option<String>,
    pub milestones: Option<String>,
    pub dependencies: Option<String>,
    pub comments: Option<String>,
    /// Enables the initial-task + reminder workflow on creation.
    pub auto_reminders: bool,
    /// Project image, technical documentation and additional files.
    pub attachments: Vec<Attachment>,
}

impl Project {
    /// Creates an empty project in `Planning` with medium priority.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an empty project with a caller-provided stable ID.
    pub fn with_id(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            employee_ids: Vec::new(),
            hourly_cost: 0.0,
            assigned_hours: 0.0,
            total_cost: 0.0,
            description: None,
            client: None,
            status: ProjectStatus::Planning,
            progress: 0.0,
            start_date: None,
            end_date: None,
            priority: ProjectPriority::Medium,
            responsible_id: None,
            estimated_budget: 0.0,
            resources: Vec::new(),
            resource_cost: 0.0,
            tasks: Vec::new(),
            kpis: Vec::new(),
            ideas: Vec::new(),
            feedback: Vec::new(),
            collaborators: None,
            risks: None,
            milestones: None,
            dependencies: None,
            comments: None,
            auto_reminders: false,
            attachments: Vec::new(),
        }
    }

    /// Attaches a task and returns its id.
    pub fn add_task(&mut self, mut task: Task) -> TaskId {
        task.project_id = self.id;
        let id = task.id;
        self.tasks.push(task);
        id
    }

    /// Attaches a resource and returns its id.
    pub fn add_resource(&mut self, mut resource: Resource) -> ResourceId {
        resource.project_id = self.id;
        let id = resource.id;
        self.resources.push(resource);
        id
    }

    pub fn add_kpi(&mut self, mut kpi: Kpi) -> KpiId {
        kpi.project_id = self.id;
        let id = kpi.id;
        self.kpis.push(kpi);
        id
    }

    pub fn add_idea(&mut self, mut idea: Idea) -> IdeaId {
        idea.project_id = self.id;
        let id = idea.id;
        self.ideas.push(idea);
        id
    }

    pub fn add_feedback(&mut self, mut feedback: Feedback) -> FeedbackId {
        feedback.project_id = self.id;
        let id = feedback.id;
        self.feedback.push(feedback);
        id
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn feedback_mut(&mut self, id: FeedbackId) -> Option<&mut Feedback> {
        self.feedback.iter_mut().find(|entry| entry.id == id)
    }

    /// Deep copy with fresh identities throughout the graph.
    ///
    /// The copy is named `"<name> (copy)"` and restarts in `Planning`; tasks
    /// restart as pending and resources as draft. Derived fields are copied
    /// as-is, so callers recompute before persisting.
    pub fn duplicate(&self) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            name: format!("{} (copy)", self.name),
            status: ProjectStatus::Planning,
            resources: self
                .resources
                .iter()
                .map(|resource| resource.duplicate_for(id))
                .collect(),
            tasks: self.tasks.iter().map(|task| task.duplicate_for(id)).collect(),
            kpis: self
                .kpis
                .iter()
                .map(|kpi| Kpi {
                    id: Uuid::new_v4(),
                    project_id: id,
                    ..kpi.clone()
                })
                .collect(),
            ideas: self.ideas.iter().map(|idea| idea.duplicate_for(id)).collect(),
            feedback: self
                .feedback
                .iter()
                .map(|entry| entry.duplicate_for(id))
                .collect(),
            attachments: self.attachments.iter().map(Attachment::duplicate).collect(),
            ..self.clone()
        }
    }

    /// Recomputes every derived field of the graph.
    pub fn recompute(&mut self) {
        crate::compute::recompute_project(self);
    }

    /// Whether the project is overdue on `today`: past its end date and not finished.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != ProjectStatus::Finished && self.end_date.is_some_and(|end| end < today)
    }
}
