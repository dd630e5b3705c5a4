//! Portfolio-wide metrics.
//!
//! # Invariants
//! - Averages and ratios are `0.0` when their denominator is zero.
//! - Overdue means past its end date on `today` and not finished.

use crate::model::employee::{Availability, Employee};
use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Task, TaskStatus};
use crate::repo::employee_repo::{EmployeeListQuery, EmployeeRepository};
use crate::repo::project_repo::{ProjectListQuery, ProjectRepository};
use crate::service::ServiceResult;
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

/// Aggregate counts over every project, task and employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub today: NaiveDate,
    pub total_projects: usize,
    /// Projects in progress.
    pub active_projects: usize,
    pub finished_projects: usize,
    pub overdue_projects: usize,
    pub average_progress: f64,
    pub total_budget: f64,
    /// Sum of resource costs.
    pub actual_spend: f64,
    /// `actual_spend / total_budget * 100`.
    pub budget_efficiency: f64,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub available_employees: usize,
}

/// Computes a snapshot from already loaded records.
pub fn compute_metrics(
    projects: &[Project],
    tasks: &[Task],
    employees: &[Employee],
    today: NaiveDate,
) -> MetricsSnapshot {
    let total_projects = projects.len();
    let count_status =
        |status: ProjectStatus| projects.iter().filter(|project| project.status == status).count();

    let average_progress = if total_projects == 0 {
        0.0
    } else {
        projects.iter().map(|project| project.progress).sum::<f64>() / total_projects as f64
    };
    let total_budget: f64 = projects.iter().map(|project| project.estimated_budget).sum();
    let actual_spend: f64 = projects.iter().map(|project| project.resource_cost).sum();
    let budget_efficiency = if total_budget > 0.0 {
        actual_spend / total_budget * 100.0
    } else {
        0.0
    };

    MetricsSnapshot {
        today,
        total_projects,
        active_projects: count_status(ProjectStatus::InProgress),
        finished_projects: count_status(ProjectStatus::Finished),
        overdue_projects: projects
            .iter()
            .filter(|project| project.is_overdue(today))
            .count(),
        average_progress,
        total_budget,
        actual_spend,
        budget_efficiency,
        total_tasks: tasks.len(),
        completed_tasks: tasks.iter().filter(|task| task.is_completed()).count(),
        pending_tasks: tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Pending)
            .count(),
        available_employees: employees
            .iter()
            .filter(|employee| employee.availability == Availability::Available)
            .count(),
    }
}

/// Read-only metrics facade over repository implementations.
pub struct MetricsService<P: ProjectRepository, E: EmployeeRepository> {
    projects: P,
    employees: E,
}

impl<P: ProjectRepository, E: EmployeeRepository> MetricsService<P, E> {
    pub fn new(projects: P, employees: E) -> Self {
        Self {
            projects,
            employees,
        }
    }

    pub fn metrics_snapshot(&self, today: NaiveDate) -> ServiceResult<MetricsSnapshot> {
        let projects = self.projects.list_projects(&ProjectListQuery::default())?;
        let tasks = self.projects.list_all_tasks(None)?;
        let employees = self.employees.list_employees(&EmployeeListQuery::default())?;

        let snapshot = compute_metrics(&projects, &tasks, &employees, today);
        info!(
            "event=metrics_snapshot module=service status=ok projects={} tasks={} employees={}",
            snapshot.total_projects,
            snapshot.total_tasks,
            employees.len()
        );
        Ok(snapshot)
    }
}
