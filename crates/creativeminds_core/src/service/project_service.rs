//! Project use-case service.
//!
//! # Responsibility
//! - Create, update, re-status and duplicate project graphs.
//! - Run the automatic-reminder workflow on creation.
//! - Manage feedback follow-up actions.
//! - Produce per-project summaries.
//!
//! # Invariants
//! - Creation and duplication require an existing responsible employee.
//! - Feedback action due dates are checked only for new actions or changed
//!   due dates, so past-due actions never lock their project.
//! - Duplication never triggers the reminder workflow.

use crate::clock::Clock;
use crate::model::employee::Employee;
use crate::model::feedback::{ActionStatus, FeedbackAction};
use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Task, TaskStatus};
use crate::model::{ActionId, EmployeeId, FeedbackId, ProjectId};
use crate::notify::{Notifier, Recipient};
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::project_repo::{ProjectListQuery, ProjectRepository};
use crate::service::{log_rejection, post_or_log, schedule_or_log, ServiceError, ServiceResult};
use crate::validation::{validate_action_due_date, validate_project, ValidationError, ValidationFailed};
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::HashMap;

/// Name prefix of the task added by the automatic-reminder workflow.
pub const INITIAL_TASK_PREFIX: &str = "Initial task for project: ";

/// Budget part of a [`ProjectSummary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetBreakdown {
    pub estimated: f64,
    /// Total resource cost.
    pub actual: f64,
    /// `estimated - actual`; negative when over budget.
    pub available: f64,
}

/// Task counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
}

impl TaskCounts {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            counts.total += 1;
            match task.status {
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Pending => counts.pending += 1,
            }
        }
        counts
    }
}

/// Read-only digest of one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    pub progress: f64,
    pub budget: BudgetBreakdown,
    pub tasks: TaskCounts,
}

impl ProjectSummary {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            status: project.status,
            progress: project.progress,
            budget: BudgetBreakdown {
                estimated: project.estimated_budget,
                actual: project.resource_cost,
                available: project.estimated_budget - project.resource_cost,
            },
            tasks: TaskCounts::from_tasks(&project.tasks),
        }
    }
}

/// Project service facade over repository implementations.
pub struct ProjectService<P, E, N, C>
where
    P: ProjectRepository,
    E: EmployeeRepository,
    N: Notifier,
    C: Clock,
{
    projects: P,
    employees: E,
    notifier: N,
    clock: C,
}

impl<P, E, N, C> ProjectService<P, E, N, C>
where
    P: ProjectRepository,
    E: EmployeeRepository,
    N: Notifier,
    C: Clock,
{
    pub fn new(projects: P, employees: E, notifier: N, clock: C) -> Self {
        Self {
            projects,
            employees,
            notifier,
            clock,
        }
    }

    /// Creates a project graph and runs the reminder workflow when enabled.
    ///
    /// With `auto_reminders`, a pending initial task assigned to the
    /// responsible employee is added before persisting; after the write a
    /// reminder message and a follow-up activity go to that employee.
    pub fn create_project(&self, mut project: Project) -> ServiceResult<Project> {
        let event = "project_create";
        let responsible = self
            .responsible_for(&project)
            .inspect_err(|err| log_rejection(event, "service", err))?;

        if project.auto_reminders {
            let mut task = Task::new(project.id, format!("{INITIAL_TASK_PREFIX}{}", project.name));
            task.responsible_id = Some(responsible.id);
            project.add_task(task);
        }

        self.save(event, &mut project, None, |repo, project| {
            repo.create_project(project).map(|_| ())
        })?;

        if project.auto_reminders {
            self.send_reminder(&project, &responsible);
        }
        Ok(project)
    }

    /// Replaces a stored project graph.
    pub fn update_project(&self, mut project: Project) -> ServiceResult<Project> {
        let event = "project_update";
        let stored = self
            .get_project(project.id)
            .inspect_err(|err| log_rejection(event, "service", err))?;
        if let Some(responsible_id) = project.responsible_id {
            self.require_employee(responsible_id)
                .inspect_err(|err| log_rejection(event, "service", err))?;
        }

        self.save(event, &mut project, Some(&stored), |repo, project| {
            repo.update_project(project)
        })?;
        Ok(project)
    }

    /// Moves a project to `status` and notifies its responsible employee.
    pub fn change_status(&self, id: ProjectId, status: ProjectStatus) -> ServiceResult<Project> {
        let event = "project_status_change";
        let mut project = self
            .get_project(id)
            .inspect_err(|err| log_rejection(event, "service", err))?;
        let stored = project.clone();
        project.status = status;

        self.save(event, &mut project, Some(&stored), |repo, project| {
            repo.update_project(project)
        })?;

        self.send_status_change(&project);
        Ok(project)
    }

    /// Persists a deep copy of a stored project and returns the copy.
    pub fn duplicate_project(&self, id: ProjectId) -> ServiceResult<Project> {
        let event = "project_duplicate";
        let original = self
            .get_project(id)
            .inspect_err(|err| log_rejection(event, "service", err))?;
        let mut copy = original.duplicate();
        copy.recompute();

        let result = self
            .responsible_for(&copy)
            .and_then(|_| Ok(ValidationFailed::check(validate_project(&copy))?))
            .and_then(|()| Ok(self.projects.create_project(&copy)?));
        if let Err(err) = &result {
            log_rejection(event, "service", err);
        }
        result?;

        info!(
            "event={event} module=service status=ok source_id={} project_id={} tasks={} resources={}",
            original.id,
            copy.id,
            copy.tasks.len(),
            copy.resources.len()
        );
        Ok(copy)
    }

    pub fn get_project(&self, id: ProjectId) -> ServiceResult<Project> {
        self.projects
            .get_project(id)?
            .ok_or(ServiceError::ProjectNotFound(id))
    }

    pub fn list_projects(&self, query: &ProjectListQuery) -> ServiceResult<Vec<Project>> {
        Ok(self.projects.list_projects(query)?)
    }

    /// Name, status, progress, budget breakdown and task counts of one project.
    pub fn project_summary(&self, id: ProjectId) -> ServiceResult<ProjectSummary> {
        let project = self.get_project(id)?;
        Ok(ProjectSummary::from_project(&project))
    }

    /// Adds a follow-up action to a feedback entry and returns its id.
    pub fn add_feedback_action(
        &self,
        project_id: ProjectId,
        feedback_id: FeedbackId,
        action: FeedbackAction,
    ) -> ServiceResult<ActionId> {
        let event = "feedback_action_add";
        let mut project = self
            .get_project(project_id)
            .inspect_err(|err| log_rejection(event, "service", err))?;
        let stored = project.clone();

        let feedback = project
            .feedback_mut(feedback_id)
            .ok_or(ServiceError::FeedbackNotFound(feedback_id))
            .inspect_err(|err| log_rejection(event, "service", err))?;
        let action_id = feedback.add_action(action);

        self.save(event, &mut project, Some(&stored), |repo, project| {
            repo.update_project(project)
        })?;
        Ok(action_id)
    }

    /// Sets the status of one feedback action.
    pub fn set_feedback_action_status(
        &self,
        project_id: ProjectId,
        feedback_id: FeedbackId,
        action_id: ActionId,
        status: ActionStatus,
    ) -> ServiceResult<()> {
        let event = "feedback_action_update";
        let mut project = self
            .get_project(project_id)
            .inspect_err(|err| log_rejection(event, "service", err))?;
        let stored = project.clone();

        let action = project
            .feedback_mut(feedback_id)
            .ok_or(ServiceError::FeedbackNotFound(feedback_id))
            .and_then(|feedback| {
                feedback
                    .action_mut(action_id)
                    .ok_or(ServiceError::ActionNotFound(action_id))
            })
            .inspect_err(|err| log_rejection(event, "service", err))?;
        action.status = status;

        self.save(event, &mut project, Some(&stored), |repo, project| {
            repo.update_project(project)
        })
    }

    /// Recompute, validate, write, log.
    fn save(
        &self,
        event: &str,
        project: &mut Project,
        stored: Option<&Project>,
        write: impl FnOnce(&P, &Project) -> crate::repo::RepoResult<()>,
    ) -> ServiceResult<()> {
        project.recompute();

        let today = self.clock.today();
        let mut errors = validate_project(project);
        errors.extend(changed_action_due_date_errors(project, stored, today));

        let result = ValidationFailed::check(errors)
            .map_err(ServiceError::from)
            .and_then(|()| write(&self.projects, &*project).map_err(ServiceError::from));
        match &result {
            Ok(()) => info!(
                "event={event} module=service status=ok project_id={} status_value={} tasks={} resources={}",
                project.id,
                project.status.as_str(),
                project.tasks.len(),
                project.resources.len()
            ),
            Err(err) => log_rejection(event, "service", err),
        }
        result
    }

    fn responsible_for(&self, project: &Project) -> ServiceResult<Employee> {
        let responsible_id = project
            .responsible_id
            .ok_or(ServiceError::MissingResponsible)?;
        self.require_employee(responsible_id)
    }

    fn require_employee(&self, id: EmployeeId) -> ServiceResult<Employee> {
        self.employees
            .get_employee(id)?
            .ok_or(ServiceError::UnknownEmployee(id))
    }

    fn send_reminder(&self, project: &Project, responsible: &Employee) {
        let recipient = Recipient::from(responsible);
        let subject = format!("Reminder: Project {} - pending tasks", project.name);
        let body = format!(
            "Dear {}, project {} has pending tasks. Please review its progress and continue with the tasks.",
            responsible.name, project.name
        );
        post_or_log(&self.notifier, &recipient, &subject, &body);

        let summary = format!("Reminder: {} - pending tasks", project.name);
        let note = format!("Review the pending tasks of project {}.", project.name);
        schedule_or_log(&self.notifier, &recipient, &summary, &note);
    }

    fn send_status_change(&self, project: &Project) {
        let Some(responsible_id) = project.responsible_id else {
            return;
        };
        let responsible = match self.employees.get_employee(responsible_id) {
            Ok(Some(employee)) => employee,
            Ok(None) => {
                warn!(
                    "event=notify module=service status=skip reason=unknown_responsible project_id={}",
                    project.id
                );
                return;
            }
            Err(err) => {
                warn!(
                    "event=notify module=service status=error project_id={} error={err}",
                    project.id
                );
                return;
            }
        };

        let subject = format!("Status change: Project {}", project.name);
        let body = format!(
            "Hello {}, the status of project {} changed to {}. Current progress: {:.2}%",
            responsible.name,
            project.name,
            project.status.label(),
            project.progress
        );
        post_or_log(&self.notifier, &Recipient::from(&responsible), &subject, &body);
    }
}

/// Due-date violations of actions that are new or whose due date changed.
fn changed_action_due_date_errors(
    project: &Project,
    stored: Option<&Project>,
    today: NaiveDate,
) -> Vec<ValidationError> {
    let previous: HashMap<ActionId, Option<NaiveDate>> = stored
        .map(|stored| {
            stored
                .feedback
                .iter()
                .flat_map(|entry| entry.actions.iter())
                .map(|action| (action.id, action.due_date))
                .collect()
        })
        .unwrap_or_default();

    project
        .feedback
        .iter()
        .flat_map(|entry| entry.actions.iter())
        .filter(|action| previous.get(&action.id) != Some(&action.due_date))
        .flat_map(|action| validate_action_due_date(action, today))
        .collect()
}
