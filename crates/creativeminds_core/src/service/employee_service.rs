//! Employee and team use-case service.
//!
//! # Responsibility
//! - Validate employees (national ID format and uniqueness, age) before writes.
//! - Send the welcome notification on creation.
//! - Create and list teams with derived size.
//!
//! # Invariants
//! - Uniqueness excludes the employee being updated.
//! - `hire_date` defaults to today on creation.

use crate::clock::Clock;
use crate::compute::recompute_team;
use crate::model::employee::{Employee, Team};
use crate::model::{EmployeeId, TeamId};
use crate::notify::{Notifier, Recipient};
use crate::repo::employee_repo::{EmployeeListQuery, EmployeeRepository};
use crate::repo::RepoError;
use crate::service::{log_rejection, post_or_log, ServiceError, ServiceResult};
use crate::validation::{validate_employee, validate_team, ValidationError, ValidationFailed};
use log::info;

/// Employee service facade over repository implementations.
pub struct EmployeeService<E: EmployeeRepository, N: Notifier, C: Clock> {
    repo: E,
    notifier: N,
    clock: C,
}

impl<E: EmployeeRepository, N: Notifier, C: Clock> EmployeeService<E, N, C> {
    pub fn new(repo: E, notifier: N, clock: C) -> Self {
        Self {
            repo,
            notifier,
            clock,
        }
    }

    /// Registers an employee and posts a welcome message to their contact.
    pub fn create_employee(&self, mut employee: Employee) -> ServiceResult<Employee> {
        let event = "employee_create";
        let today = self.clock.today();
        employee.hire_date.get_or_insert(today);

        let result = self
            .check(&employee)
            .and_then(|()| Ok(self.repo.create_employee(&employee)?));
        match &result {
            Ok(_) => info!(
                "event={event} module=service status=ok employee_id={}",
                employee.id
            ),
            Err(err) => log_rejection(event, "service", err),
        }
        result?;

        post_or_log(
            &self.notifier,
            &Recipient::from(&employee),
            "New employee",
            &format!("A new employee has been created: {}.", employee.full_name()),
        );
        Ok(employee)
    }

    pub fn update_employee(&self, employee: Employee) -> ServiceResult<Employee> {
        let event = "employee_update";
        let result = self
            .check(&employee)
            .and_then(|()| match self.repo.update_employee(&employee) {
                Err(RepoError::NotFound(id)) => Err(ServiceError::EmployeeNotFound(id)),
                other => Ok(other?),
            });
        match &result {
            Ok(()) => info!(
                "event={event} module=service status=ok employee_id={}",
                employee.id
            ),
            Err(err) => log_rejection(event, "service", err),
        }
        result.map(|()| employee)
    }

    pub fn get_employee(&self, id: EmployeeId) -> ServiceResult<Employee> {
        self.repo
            .get_employee(id)?
            .ok_or(ServiceError::EmployeeNotFound(id))
    }

    pub fn list_employees(&self, query: &EmployeeListQuery) -> ServiceResult<Vec<Employee>> {
        Ok(self.repo.list_employees(query)?)
    }

    /// Creates a team whose members must all be known employees, each listed once.
    pub fn create_team(&self, mut team: Team) -> ServiceResult<Team> {
        let event = "team_create";
        let result = self.check_team_members(&team).and_then(|()| {
            recompute_team(&mut team);
            Ok(self.repo.create_team(&team)?)
        });
        match &result {
            Ok(_) => info!(
                "event={event} module=service status=ok team_id={} size={}",
                team.id, team.size
            ),
            Err(err) => log_rejection(event, "service", err),
        }
        result.map(|_| team)
    }

    pub fn get_team(&self, id: TeamId) -> ServiceResult<Option<Team>> {
        Ok(self.repo.get_team(id)?)
    }

    pub fn list_teams(&self) -> ServiceResult<Vec<Team>> {
        Ok(self.repo.list_teams()?)
    }

    /// Record rules plus national ID uniqueness, reported as one batch.
    fn check(&self, employee: &Employee) -> ServiceResult<()> {
        let mut errors = validate_employee(employee, self.clock.today());
        if let Some(existing) = self.repo.find_by_national_id(&employee.national_id)? {
            if existing.id != employee.id {
                errors.push(ValidationError::DuplicateNationalId {
                    value: employee.national_id.clone(),
                });
            }
        }
        Ok(ValidationFailed::check(errors)?)
    }

    fn check_team_members(&self, team: &Team) -> ServiceResult<()> {
        ValidationFailed::check(validate_team(team))?;
        for id in team.member_ids.iter().chain(team.responsible_id.iter()) {
            if self.repo.get_employee(*id)?.is_none() {
                return Err(ServiceError::UnknownEmployee(*id));
            }
        }
        Ok(())
    }
}
