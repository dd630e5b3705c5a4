//! Project rules.
//!
//! Every rule is an independent check; `validate_project` runs all of them
//! plus the task rules of each owned task.

use crate::compute;
use crate::model::has_text;
use crate::model::project::{Project, ProjectPriority, ProjectStatus};
use crate::validation::{repeated_employee_errors, validate_task, ValidationError};

/// Minimum budget reserved per resource.
pub const BUDGET_PER_RESOURCE: f64 = 500.0;
/// Minimum budget reserved per task.
pub const BUDGET_PER_TASK: f64 = 200.0;
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Minimum budget needed to cover `resources` and `tasks`.
pub fn required_budget(resources: usize, tasks: usize) -> f64 {
    resources as f64 * BUDGET_PER_RESOURCE + tasks as f64 * BUDGET_PER_TASK
}

/// Runs every project rule and returns all violations.
pub fn validate_project(project: &Project) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_cost_and_hours(project, &mut errors);
    check_responsible(project, &mut errors);
    check_resource_cost(project, &mut errors);
    check_budget(project, &mut errors);
    check_dates(project, &mut errors);
    check_description(project, &mut errors);
    check_client(project, &mut errors);
    check_planning_fields(project, &mut errors);
    check_minimum_resources(project, &mut errors);
    check_in_progress_requirements(project, &mut errors);
    check_repeated_employees(project, &mut errors);
    for task in &project.tasks {
        errors.extend(validate_task(task));
    }
    errors
}

// Comparisons are written as the positive rule so NaN fails them.
fn check_cost_and_hours(project: &Project, errors: &mut Vec<ValidationError>) {
    if !(project.hourly_cost >= 0.0 && project.assigned_hours >= 0.0) {
        errors.push(ValidationError::NegativeCostOrHours {
            hourly_cost: project.hourly_cost,
            assigned_hours: project.assigned_hours,
        });
    }
}

fn check_responsible(project: &Project, errors: &mut Vec<ValidationError>) {
    if project.status != ProjectStatus::Planning && project.responsible_id.is_none() {
        errors.push(ValidationError::MissingResponsible);
    }
}

fn check_resource_cost(project: &Project, errors: &mut Vec<ValidationError>) {
    // Recomputed here so a stale stored aggregate cannot mask an overrun.
    let resource_cost = compute::resource_cost(&project.resources);
    if !(resource_cost <= project.estimated_budget) {
        errors.push(ValidationError::ResourceCostExceedsBudget {
            resource_cost,
            budget: project.estimated_budget,
        });
    }
}

fn check_budget(project: &Project, errors: &mut Vec<ValidationError>) {
    let budget = project.estimated_budget;
    if !(budget > 0.0) {
        errors.push(ValidationError::NonPositiveBudget { budget });
        return;
    }
    let resources = project.resources.len();
    let tasks = project.tasks.len();
    let required = required_budget(resources, tasks);
    if (resources > 0 || tasks > 0) && budget < required {
        errors.push(ValidationError::InsufficientBudget { budget, required });
    }
}

fn check_repeated_employees(project: &Project, errors: &mut Vec<ValidationError>) {
    errors.extend(repeated_employee_errors(
        &format!("project `{}`", project.name),
        &project.employee_ids,
    ));
    for resource in &project.resources {
        errors.extend(repeated_employee_errors(
            &format!("resource `{}`", resource.name),
            &resource.employee_ids,
        ));
    }
}

fn check_dates(project: &Project, errors: &mut Vec<ValidationError>) {
    if let (Some(start), Some(end)) = (project.start_date, project.end_date) {
        if start > end {
            errors.push(ValidationError::InvalidDateRange { start, end });
        }
    }
}

fn check_description(project: &Project, errors: &mut Vec<ValidationError>) {
    let Some(description) = project.description.as_deref() else {
        return;
    };
    let actual = description.trim().chars().count();
    // Blank text counts as "not provided".
    if actual > 0 && actual < MIN_DESCRIPTION_CHARS {
        errors.push(ValidationError::DescriptionTooShort {
            min: MIN_DESCRIPTION_CHARS,
            actual,
        });
    }
}

fn check_client(project: &Project, errors: &mut Vec<ValidationError>) {
    let needs_client = matches!(
        project.status,
        ProjectStatus::InProgress | ProjectStatus::Finished
    );
    if needs_client && !has_text(project.client.as_deref()) {
        errors.push(ValidationError::MissingClient {
            status: project.status,
        });
    }
}

fn check_planning_fields(project: &Project, errors: &mut Vec<ValidationError>) {
    if project.priority != ProjectPriority::High {
        return;
    }
    if !has_text(project.risks.as_deref()) {
        errors.push(ValidationError::MissingRisks);
    }
    if !has_text(project.milestones.as_deref()) {
        errors.push(ValidationError::MissingMilestones);
    }
}

fn check_minimum_resources(project: &Project, errors: &mut Vec<ValidationError>) {
    if project.status != ProjectStatus::Planning && project.resources.is_empty() {
        errors.push(ValidationError::MissingResources);
    }
}

fn check_in_progress_requirements(project: &Project, errors: &mut Vec<ValidationError>) {
    if project.status != ProjectStatus::InProgress {
        return;
    }
    if project.start_date.is_none() {
        errors.push(ValidationError::MissingStartDate);
    }
    if project.end_date.is_none() {
        errors.push(ValidationError::MissingEndDate);
    }
    if project.tasks.is_empty() {
        errors.push(ValidationError::MissingTasks);
    }

    for task in &project.tasks {
        if let (Some(task_start), Some(project_start)) = (task.start_date, project.start_date) {
            if task_start < project_start {
                errors.push(ValidationError::TaskStartsBeforeProject {
                    task: task.name.clone(),
                    task_start,
                    project_start,
                });
            }
        }
        if let (Some(task_end), Some(project_end)) = (task.end_date, project.end_date) {
            if task_end > project_end {
                errors.push(ValidationError::TaskEndsAfterProject {
                    task: task.name.clone(),
                    task_end,
                    project_end,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::Resource;
    use crate::model::task::Task;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planning_project(budget: f64) -> Project {
        let mut project = Project::new("Brand refresh");
        project.estimated_budget = budget;
        project
    }

    fn started_project() -> Project {
        let mut project = planning_project(10_000.0);
        project.status = ProjectStatus::InProgress;
        project.responsible_id = Some(Uuid::new_v4());
        project.client = Some("ACME".to_string());
        project.start_date = Some(date(2026, 1, 1));
        project.end_date = Some(date(2026, 6, 30));
        project.add_resource(Resource::new(project.id, "Design"));
        project.add_task(Task::new(project.id, "Kick-off"));
        project
    }

    #[test]
    fn minimal_planning_project_is_valid() {
        assert!(validate_project(&planning_project(1.0)).is_empty());
    }

    #[test]
    fn started_project_fixture_is_valid() {
        assert_eq!(validate_project(&started_project()), Vec::new());
    }

    #[test]
    fn budget_boundary_uses_500_per_resource_and_200_per_task() {
        let mut project = planning_project(1000.0);
        project.add_resource(Resource::new(project.id, "Copywriter"));
        for index in 0..3 {
            project.add_task(Task::new(project.id, format!("task {index}")));
        }

        let errors = validate_project(&project);
        assert_eq!(
            errors,
            vec![ValidationError::InsufficientBudget {
                budget: 1000.0,
                required: 1100.0,
            }]
        );

        project.estimated_budget = 1100.0;
        assert!(validate_project(&project).is_empty());
    }

    #[test]
    fn non_positive_budget_is_rejected() {
        let errors = validate_project(&planning_project(0.0));
        assert_eq!(
            errors,
            vec![ValidationError::NonPositiveBudget { budget: 0.0 }]
        );
    }

    #[test]
    fn resource_cost_over_budget_is_rejected() {
        let mut project = planning_project(600.0);
        let mut resource = Resource::new(project.id, "Photographer");
        resource.hourly_cost = 100.0;
        resource.assigned_hours = 7.0;
        resource.total_cost = 700.0;
        project.add_resource(resource);

        let errors = validate_project(&project);
        assert!(errors.contains(&ValidationError::ResourceCostExceedsBudget {
            resource_cost: 700.0,
            budget: 600.0,
        }));
    }

    #[test]
    fn leaving_planning_collects_every_missing_requirement() {
        let mut project = planning_project(5_000.0);
        project.status = ProjectStatus::InProgress;

        let errors = validate_project(&project);
        assert!(errors.contains(&ValidationError::MissingResponsible));
        assert!(errors.contains(&ValidationError::MissingClient {
            status: ProjectStatus::InProgress,
        }));
        assert!(errors.contains(&ValidationError::MissingResources));
        assert!(errors.contains(&ValidationError::MissingStartDate));
        assert!(errors.contains(&ValidationError::MissingEndDate));
        assert!(errors.contains(&ValidationError::MissingTasks));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn stopped_project_needs_responsible_and_resources_only() {
        let mut project = planning_project(5_000.0);
        project.status = ProjectStatus::Stopped;
        let errors = validate_project(&project);
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingResponsible,
                ValidationError::MissingResources,
            ]
        );
    }

    #[test]
    fn high_priority_requires_risks_and_milestones() {
        let mut project = planning_project(1.0);
        project.priority = ProjectPriority::High;
        project.risks = Some("   ".to_string());

        let errors = validate_project(&project);
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingRisks,
                ValidationError::MissingMilestones,
            ]
        );

        project.risks = Some("Supplier delays".to_string());
        project.milestones = Some("Beta in March".to_string());
        assert!(validate_project(&project).is_empty());
    }

    #[test]
    fn short_description_is_rejected_but_blank_is_ignored() {
        let mut project = planning_project(1.0);
        project.description = Some("  tiny  ".to_string());
        assert_eq!(
            validate_project(&project),
            vec![ValidationError::DescriptionTooShort { min: 10, actual: 4 }]
        );

        project.description = Some("   ".to_string());
        assert!(validate_project(&project).is_empty());

        project.description = Some("Ten chars!".to_string());
        assert!(validate_project(&project).is_empty());
    }

    #[test]
    fn reversed_project_dates_are_rejected() {
        let mut project = planning_project(1.0);
        project.start_date = Some(date(2026, 5, 1));
        project.end_date = Some(date(2026, 4, 1));
        assert_eq!(
            validate_project(&project),
            vec![ValidationError::InvalidDateRange {
                start: date(2026, 5, 1),
                end: date(2026, 4, 1),
            }]
        );
    }

    #[test]
    fn tasks_must_fit_the_project_window_when_in_progress() {
        let mut project = started_project();
        let mut early = Task::new(project.id, "Early bird");
        early.start_date = Some(date(2025, 12, 31));
        project.add_task(early);
        let mut late = Task::new(project.id, "Straggler");
        late.end_date = Some(date(2026, 7, 1));
        project.add_task(late);

        let errors = validate_project(&project);
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            ValidationError::TaskStartsBeforeProject { task, .. } if task == "Early bird"
        ));
        assert!(matches!(
            &errors[1],
            ValidationError::TaskEndsAfterProject { task, .. } if task == "Straggler"
        ));
    }

    #[test]
    fn task_window_is_not_checked_while_planning() {
        let mut project = planning_project(10_000.0);
        project.start_date = Some(date(2026, 1, 1));
        project.end_date = Some(date(2026, 1, 31));
        let mut task = Task::new(project.id, "Outside");
        task.end_date = Some(date(2026, 3, 1));
        project.add_task(task);
        assert!(validate_project(&project).is_empty());
    }

    #[test]
    fn nan_amounts_fail_the_numeric_rules() {
        let mut project = planning_project(f64::NAN);
        project.hourly_cost = f64::NAN;

        let errors = validate_project(&project);
        assert_eq!(errors.len(), 3);
        assert!(matches!(
            errors[0],
            ValidationError::NegativeCostOrHours { hourly_cost, .. } if hourly_cost.is_nan()
        ));
        assert!(matches!(
            errors[1],
            ValidationError::ResourceCostExceedsBudget { budget, .. } if budget.is_nan()
        ));
        assert!(matches!(
            errors[2],
            ValidationError::NonPositiveBudget { budget } if budget.is_nan()
        ));
    }

    #[test]
    fn nan_resource_cost_exceeds_any_budget() {
        let mut project = planning_project(10_000.0);
        let mut resource = Resource::new(project.id, "Render farm");
        resource.hourly_cost = f64::NAN;
        resource.assigned_hours = 3.0;
        project.add_resource(resource);
        project.recompute();

        let errors = validate_project(&project);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::ResourceCostExceedsBudget { resource_cost, budget }]
                if resource_cost.is_nan() && *budget == 10_000.0
        ));
    }

    #[test]
    fn employees_assigned_twice_are_rejected() {
        let twice = Uuid::new_v4();
        let mut project = planning_project(10_000.0);
        project.employee_ids = vec![twice, twice];
        let mut resource = Resource::new(project.id, "Studio crew");
        resource.employee_ids = vec![Uuid::new_v4(), twice, twice];
        project.add_resource(resource);

        assert_eq!(
            validate_project(&project),
            vec![
                ValidationError::RepeatedEmployee {
                    owner: "project `Brand refresh`".to_string(),
                    employee_id: twice,
                },
                ValidationError::RepeatedEmployee {
                    owner: "resource `Studio crew`".to_string(),
                    employee_id: twice,
                },
            ]
        );
    }

    #[test]
    fn negative_cost_or_hours_is_rejected() {
        let mut project = planning_project(1.0);
        project.assigned_hours = -1.0;
        assert_eq!(
            validate_project(&project),
            vec![ValidationError::NegativeCostOrHours {
                hourly_cost: 0.0,
                assigned_hours: -1.0,
            }]
        );
    }
}
