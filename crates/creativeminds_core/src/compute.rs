//! Derived-field calculator.
//!
//! # Responsibility
//! - Compute every derived field as a pure function of its inputs.
//! - Provide `recompute_*` entry points that callers run after each mutation.
//!
//! # Invariants
//! - Recompute functions write derived fields only; inputs are never touched.
//! - Results are deterministic for the same inputs.

use crate::model::employee::Team;
use crate::model::idea::{Idea, Vote};
use crate::model::project::{Project, Resource};
use crate::model::task::Task;

/// Name of the KPI that mirrors project progress.
pub const PROGRESS_KPI_NAME: &str = "Project progress";

/// Cost of `hours` at `hourly_cost`.
pub fn total_cost(hourly_cost: f64, hours: f64) -> f64 {
    hourly_cost * hours
}

/// Sum of the resources' total costs.
pub fn resource_cost(resources: &[Resource]) -> f64 {
    resources.iter().map(|resource| resource.total_cost).sum()
}

/// Completed share of `tasks` in percent; `0.0` when there are no tasks.
pub fn progress_percentage(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// Arithmetic mean of vote scores; `0.0` when there are no votes.
pub fn idea_score(votes: &[Vote]) -> f64 {
    if votes.is_empty() {
        return 0.0;
    }
    votes.iter().map(|vote| vote.score).sum::<f64>() / votes.len() as f64
}

pub fn team_size(team: &Team) -> usize {
    team.member_ids.len()
}

pub fn recompute_resource(resource: &mut Resource) {
    resource.total_cost = total_cost(resource.hourly_cost, resource.assigned_hours);
}

pub fn recompute_idea(idea: &mut Idea) {
    idea.score = idea_score(&idea.votes);
}

pub fn recompute_team(team: &mut Team) {
    team.size = team_size(team);
}

/// Recomputes the whole project graph.
///
/// Children first, so aggregates see fresh child values. When the project
/// tracks a KPI named [`PROGRESS_KPI_NAME`], its value follows `progress`.
pub fn recompute_project(project: &mut Project) {
    project.resources.iter_mut().for_each(recompute_resource);
    project.ideas.iter_mut().for_each(recompute_idea);

    project.total_cost = total_cost(project.hourly_cost, project.assigned_hours);
    project.resource_cost = resource_cost(&project.resources);
    project.progress = progress_percentage(&project.tasks);

    let progress = project.progress;
    if let Some(kpi) = project
        .kpis
        .iter_mut()
        .find(|kpi| kpi.name == PROGRESS_KPI_NAME)
    {
        kpi.value = progress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::Kpi;
    use crate::model::task::TaskStatus;
    use uuid::Uuid;

    fn project_with_tasks(statuses: &[TaskStatus]) -> Project {
        let mut project = Project::new("Website relaunch");
        for (index, status) in statuses.iter().enumerate() {
            let mut task = Task::new(project.id, format!("task {index}"));
            task.status = *status;
            project.add_task(task);
        }
        project
    }

    #[test]
    fn total_cost_is_rate_times_hours() {
        for (rate, hours) in [(0.0, 0.0), (25.0, 8.0), (12.5, 3.5), (100.0, 0.0)] {
            assert_eq!(total_cost(rate, hours), rate * hours);
        }
    }

    #[test]
    fn progress_is_zero_without_tasks() {
        assert_eq!(progress_percentage(&[]), 0.0);
    }

    #[test]
    fn progress_counts_completed_share() {
        let project = project_with_tasks(&[
            TaskStatus::Completed,
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ]);
        assert_eq!(progress_percentage(&project.tasks), 50.0);
    }

    #[test]
    fn idea_score_is_mean_or_zero() {
        let mut idea = Idea::new(Uuid::new_v4(), "Dark mode");
        recompute_idea(&mut idea);
        assert_eq!(idea.score, 0.0);

        idea.cast_vote(Uuid::new_v4(), 3.0);
        idea.cast_vote(Uuid::new_v4(), 4.0);
        idea.cast_vote(Uuid::new_v4(), 5.0);
        recompute_idea(&mut idea);
        assert_eq!(idea.score, 4.0);
    }

    #[test]
    fn team_size_counts_members() {
        let mut team = Team::new("Design");
        team.member_ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        recompute_team(&mut team);
        assert_eq!(team.size, 2);
    }

    #[test]
    fn recompute_project_refreshes_every_derived_field() {
        let mut project = project_with_tasks(&[TaskStatus::Completed, TaskStatus::Pending]);
        project.hourly_cost = 40.0;
        project.assigned_hours = 10.0;

        let mut design = Resource::new(project.id, "Design");
        design.hourly_cost = 30.0;
        design.assigned_hours = 5.0;
        project.add_resource(design);
        let mut dev = Resource::new(project.id, "Development");
        dev.hourly_cost = 50.0;
        dev.assigned_hours = 2.0;
        project.add_resource(dev);

        project.add_kpi(Kpi::new(project.id, PROGRESS_KPI_NAME, 100.0));
        project.add_kpi(Kpi::new(project.id, "Client satisfaction", 9.0));

        recompute_project(&mut project);

        assert_eq!(project.total_cost, 400.0);
        assert_eq!(project.resources[0].total_cost, 150.0);
        assert_eq!(project.resources[1].total_cost, 100.0);
        assert_eq!(project.resource_cost, 250.0);
        assert_eq!(project.progress, 50.0);
        assert_eq!(project.kpis[0].value, 50.0);
        assert_eq!(project.kpis[1].value, 0.0);
    }
}
