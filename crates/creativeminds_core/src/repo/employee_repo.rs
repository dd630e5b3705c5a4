//! Employee and team repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist employees and teams.
//! - Surface national ID collisions as validation failures.
//!
//! # Invariants
//! - Writes reject malformed national IDs before SQL mutations.
//! - National ID uniqueness is case-insensitive (`COLLATE NOCASE`).
//! - Loaded teams always carry a fresh derived `size`.

use crate::compute::recompute_team;
use crate::model::employee::{Availability, Employee, Team};
use crate::model::{EmployeeId, TeamId};
use crate::repo::{load_ids, parse_optional_uuid, parse_stored, parse_uuid, RepoError, RepoResult};
use crate::validation::{is_valid_national_id, ValidationError, ValidationFailed};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    first_surname,
    second_surname,
    national_id,
    birth_date,
    hire_date,
    department,
    position,
    phone,
    email,
    contact,
    availability
FROM employees";

/// Query options for listing employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployeeListQuery {
    pub availability: Option<Availability>,
}

/// Repository interface for employees and teams.
pub trait EmployeeRepository {
    fn create_employee(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Lists employees ordered by name, then id.
    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>>;
    /// Case-insensitive lookup by national ID.
    fn find_by_national_id(&self, national_id: &str) -> RepoResult<Option<Employee>>;
    fn create_team(&self, team: &Team) -> RepoResult<TeamId>;
    fn get_team(&self, id: TeamId) -> RepoResult<Option<Team>>;
    fn list_teams(&self) -> RepoResult<Vec<Team>>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        check_national_id(employee)?;

        self.conn
            .execute(
                "INSERT INTO employees (
                    uuid, name, first_surname, second_surname, national_id, birth_date,
                    hire_date, department, position, phone, email, contact, availability
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);",
                params![
                    employee.id.to_string(),
                    employee.name.as_str(),
                    employee.first_surname.as_deref(),
                    employee.second_surname.as_deref(),
                    employee.national_id.as_str(),
                    employee.birth_date,
                    employee.hire_date,
                    employee.department.as_deref(),
                    employee.position.as_deref(),
                    employee.phone.as_deref(),
                    employee.email.as_deref(),
                    employee.contact.as_str(),
                    employee.availability.as_str(),
                ],
            )
            .map_err(|err| map_national_id_conflict(err, &employee.national_id))?;

        Ok(employee.id)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        check_national_id(employee)?;

        let changed = self
            .conn
            .execute(
                "UPDATE employees
                 SET
                    name = ?2,
                    first_surname = ?3,
                    second_surname = ?4,
                    national_id = ?5,
                    birth_date = ?6,
                    hire_date = ?7,
                    department = ?8,
                    position = ?9,
                    phone = ?10,
                    email = ?11,
                    contact = ?12,
                    availability = ?13,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?1;",
                params![
                    employee.id.to_string(),
                    employee.name.as_str(),
                    employee.first_surname.as_deref(),
                    employee.second_surname.as_deref(),
                    employee.national_id.as_str(),
                    employee.birth_date,
                    employee.hire_date,
                    employee.department.as_deref(),
                    employee.position.as_deref(),
                    employee.phone.as_deref(),
                    employee.email.as_deref(),
                    employee.contact.as_str(),
                    employee.availability.as_str(),
                ],
            )
            .map_err(|err| map_national_id_conflict(err, &employee.national_id))?;

        if changed == 0 {
            return Err(RepoError::NotFound(employee.id));
        }
        Ok(())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let row = stmt
            .query_row([id.to_string()], |row| Ok(parse_employee_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>> {
        let order = "ORDER BY name COLLATE NOCASE ASC, uuid ASC";
        let mut stmt;
        let mut rows = match query.availability {
            Some(availability) => {
                stmt = self.conn.prepare(&format!(
                    "{EMPLOYEE_SELECT_SQL} WHERE availability = ?1 {order};"
                ))?;
                stmt.query([availability.as_str()])?
            }
            None => {
                stmt = self
                    .conn
                    .prepare(&format!("{EMPLOYEE_SELECT_SQL} {order};"))?;
                stmt.query([])?
            }
        };

        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn find_by_national_id(&self, national_id: &str) -> RepoResult<Option<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL} WHERE national_id = ?1 COLLATE NOCASE;"
        ))?;
        let row = stmt
            .query_row([national_id.trim()], |row| Ok(parse_employee_row(row)))
            .optional()?;
        row.transpose()
    }

    fn create_team(&self, team: &Team) -> RepoResult<TeamId> {
        let tx = self.conn.unchecked_transaction()?;
        let team_uuid = team.id.to_string();
        tx.execute(
            "INSERT INTO teams (uuid, name, responsible_uuid, description)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                team_uuid,
                team.name.as_str(),
                team.responsible_id.map(|id| id.to_string()),
                team.description.as_deref(),
            ],
        )?;
        for (position, member_id) in team.member_ids.iter().enumerate() {
            tx.execute(
                "INSERT INTO team_members (team_uuid, employee_uuid, position)
                 VALUES (?1, ?2, ?3);",
                params![team_uuid, member_id.to_string(), position as i64],
            )?;
        }
        tx.commit()?;
        Ok(team.id)
    }

    fn get_team(&self, id: TeamId) -> RepoResult<Option<Team>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, responsible_uuid, description FROM teams WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(self.parse_team_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_teams(&self) -> RepoResult<Vec<Team>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, responsible_uuid, description
             FROM teams
             ORDER BY name COLLATE NOCASE ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next()? {
            teams.push(self.parse_team_row(row)?);
        }
        Ok(teams)
    }
}

impl SqliteEmployeeRepository<'_> {
    fn parse_team_row(&self, row: &Row<'_>) -> RepoResult<Team> {
        let uuid_text: String = row.get("uuid")?;
        let mut team = Team::new(row.get::<_, String>("name")?);
        team.id = parse_uuid(&uuid_text, "teams.uuid")?;
        team.responsible_id =
            parse_optional_uuid(row.get("responsible_uuid")?, "teams.responsible_uuid")?;
        team.description = row.get("description")?;
        team.member_ids = load_ids(
            self.conn,
            "SELECT employee_uuid FROM team_members
             WHERE team_uuid = ?1 ORDER BY position ASC;",
            [uuid_text.as_str()],
            "team_members.employee_uuid",
        )?;
        recompute_team(&mut team);
        Ok(team)
    }
}

fn check_national_id(employee: &Employee) -> RepoResult<()> {
    if is_valid_national_id(&employee.national_id) {
        return Ok(());
    }
    Err(ValidationFailed::from(ValidationError::InvalidNationalId {
        value: employee.national_id.clone(),
    })
    .into())
}

fn map_national_id_conflict(err: rusqlite::Error, national_id: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.code == ErrorCode::ConstraintViolation
                && message.contains("employees.national_id") =>
        {
            ValidationFailed::from(ValidationError::DuplicateNationalId {
                value: national_id.to_string(),
            })
            .into()
        }
        _ => err.into(),
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let availability_text: String = row.get("availability")?;
    Ok(Employee {
        id: parse_uuid(&row.get::<_, String>("uuid")?, "employees.uuid")?,
        name: row.get("name")?,
        first_surname: row.get("first_surname")?,
        second_surname: row.get("second_surname")?,
        national_id: row.get("national_id")?,
        birth_date: row.get("birth_date")?,
        hire_date: row.get("hire_date")?,
        department: row.get("department")?,
        position: row.get("position")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        contact: row.get("contact")?,
        availability: parse_stored(
            &availability_text,
            "employees.availability",
            Availability::parse,
        )?,
    })
}
