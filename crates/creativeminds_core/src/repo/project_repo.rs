//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist and load the whole project record graph.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate_project()` before SQL mutations.
//! - Child order is preserved through a `position` column.

use crate::model::feedback::{
    ActionStatus, Attachment, AttachmentKind, Feedback, FeedbackAction, FeedbackPriority,
};
use crate::model::idea::{Idea, Rating, Vote};
use crate::model::project::{Kpi, Project, ProjectPriority, ProjectStatus, Resource, ResourceStatus};
use crate::model::task::{Task, TaskStatus};
use crate::model::{FeedbackId, ProjectId};
use crate::repo::{
    bool_to_int, int_to_bool, load_ids, parse_optional_uuid, parse_stored, parse_uuid, RepoError,
    RepoResult,
};
use crate::validation::{validate_project, ValidationFailed};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    hourly_cost,
    assigned_hours,
    total_cost,
    description,
    client,
    status,
    progress,
    start_date,
    end_date,
    priority,
    responsible_uuid,
    estimated_budget,
    resource_cost,
    collaborators,
    risks,
    milestones,
    dependencies,
    comments,
    auto_reminders
FROM projects";

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    project_uuid,
    name,
    description,
    responsible_uuid,
    start_date,
    end_date,
    status
FROM tasks";

/// Query options for listing projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for project graphs.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    /// Replaces the stored graph of an existing project.
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Lists projects ordered by name, then id.
    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>>;
    /// Lists tasks across all projects, optionally filtered by status.
    fn list_all_tasks(&self, status: Option<TaskStatus>) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated connection (see `crate::db::open_db`).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        ValidationFailed::check(validate_project(project))?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO projects (
                uuid,
                name,
                hourly_cost,
                assigned_hours,
                total_cost,
                description,
                client,
                status,
                progress,
                start_date,
                end_date,
                priority,
                responsible_uuid,
                estimated_budget,
                resource_cost,
                collaborators,
                risks,
                milestones,
                dependencies,
                comments,
                auto_reminders
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                      ?17, ?18, ?19, ?20, ?21);",
            params![
                project.id.to_string(),
                project.name.as_str(),
                project.hourly_cost,
                project.assigned_hours,
                project.total_cost,
                project.description.as_deref(),
                project.client.as_deref(),
                project.status.as_str(),
                project.progress,
                project.start_date,
                project.end_date,
                project.priority.as_str(),
                project.responsible_id.map(|id| id.to_string()),
                project.estimated_budget,
                project.resource_cost,
                project.collaborators.as_deref(),
                project.risks.as_deref(),
                project.milestones.as_deref(),
                project.dependencies.as_deref(),
                project.comments.as_deref(),
                bool_to_int(project.auto_reminders),
            ],
        )?;
        insert_children(&tx, project)?;
        tx.commit()?;

        Ok(project.id)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        ValidationFailed::check(validate_project(project))?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE projects
             SET
                name = ?2,
                hourly_cost = ?3,
                assigned_hours = ?4,
                total_cost = ?5,
                description = ?6,
                client = ?7,
                status = ?8,
                progress = ?9,
                start_date = ?10,
                end_date = ?11,
                priority = ?12,
                responsible_uuid = ?13,
                estimated_budget = ?14,
                resource_cost = ?15,
                collaborators = ?16,
                risks = ?17,
                milestones = ?18,
                dependencies = ?19,
                comments = ?20,
                auto_reminders = ?21,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                project.id.to_string(),
                project.name.as_str(),
                project.hourly_cost,
                project.assigned_hours,
                project.total_cost,
                project.description.as_deref(),
                project.client.as_deref(),
                project.status.as_str(),
                project.progress,
                project.start_date,
                project.end_date,
                project.priority.as_str(),
                project.responsible_id.map(|id| id.to_string()),
                project.estimated_budget,
                project.resource_cost,
                project.collaborators.as_deref(),
                project.risks.as_deref(),
                project.milestones.as_deref(),
                project.dependencies.as_deref(),
                project.comments.as_deref(),
                bool_to_int(project.auto_reminders),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(project.id));
        }

        delete_children(&tx, project.id)?;
        insert_children(&tx, project)?;
        tx.commit()?;
        Ok(())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut project = parse_project_row(row)?;
        load_children(self.conn, &mut project)?;
        Ok(Some(project))
    }

    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        let mut sql = String::from("SELECT uuid FROM projects WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(priority) = query.priority {
            sql.push_str(" AND priority = ?");
            bind_values.push(Value::Text(priority.as_str().to_string()));
        }

        sql.push_str(" ORDER BY name COLLATE NOCASE ASC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let ids = load_ids(self.conn, &sql, params_from_iter(bind_values), "projects.uuid")?;
        let mut projects = Vec::with_capacity(ids.len());
        for id in ids {
            let project = self.get_project(id)?.ok_or(RepoError::NotFound(id))?;
            projects.push(project);
        }
        Ok(projects)
    }

    fn list_all_tasks(&self, status: Option<TaskStatus>) -> RepoResult<Vec<Task>> {
        let order = "ORDER BY project_uuid ASC, position ASC";
        match status {
            Some(status) => query_tasks(
                self.conn,
                &format!("{TASK_SELECT_SQL} WHERE status = ?1 {order};"),
                [status.as_str()],
            ),
            None => query_tasks(self.conn, &format!("{TASK_SELECT_SQL} {order};"), []),
        }
    }
}

fn insert_children(conn: &Connection, project: &Project) -> RepoResult<()> {
    let project_uuid = project.id.to_string();

    for (position, employee_id) in project.employee_ids.iter().enumerate() {
        conn.execute(
            "INSERT INTO project_employees (project_uuid, employee_uuid, position)
             VALUES (?1, ?2, ?3);",
            params![project_uuid, employee_id.to_string(), position as i64],
        )?;
    }

    for (position, resource) in project.resources.iter().enumerate() {
        insert_resource(conn, &project_uuid, resource, position)?;
    }

    for (position, task) in project.tasks.iter().enumerate() {
        conn.execute(
            "INSERT INTO tasks (
                uuid, project_uuid, name, description, responsible_uuid,
                start_date, end_date, status, position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                task.id.to_string(),
                project_uuid,
                task.name.as_str(),
                task.description.as_deref(),
                task.responsible_id.map(|id| id.to_string()),
                task.start_date,
                task.end_date,
                task.status.as_str(),
                position as i64,
            ],
        )?;
    }

    for (position, kpi) in project.kpis.iter().enumerate() {
        conn.execute(
            "INSERT INTO kpis (uuid, project_uuid, name, value, target, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                kpi.id.to_string(),
                project_uuid,
                kpi.name.as_str(),
                kpi.value,
                kpi.target,
                position as i64,
            ],
        )?;
    }

    for (position, idea) in project.ideas.iter().enumerate() {
        insert_idea(conn, &project_uuid, idea, position)?;
    }

    for (position, feedback) in project.feedback.iter().enumerate() {
        insert_feedback(conn, &project_uuid, feedback, position)?;
    }

    for (position, attachment) in project.attachments.iter().enumerate() {
        insert_attachment(conn, "project", &project_uuid, attachment, position)?;
    }

    Ok(())
}

fn insert_resource(
    conn: &Connection,
    project_uuid: &str,
    resource: &Resource,
    position: usize,
) -> RepoResult<()> {
    let resource_uuid = resource.id.to_string();
    conn.execute(
        "INSERT INTO resources (
            uuid, project_uuid, name, hourly_cost, assigned_hours, total_cost,
            start_date, end_date, status, position
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            resource_uuid,
            project_uuid,
            resource.name.as_str(),
            resource.hourly_cost,
            resource.assigned_hours,
            resource.total_cost,
            resource.start_date,
            resource.end_date,
            resource.status.as_str(),
            position as i64,
        ],
    )?;

    for (member_position, employee_id) in resource.employee_ids.iter().enumerate() {
        conn.execute(
            "INSERT INTO resource_employees (resource_uuid, employee_uuid, position)
             VALUES (?1, ?2, ?3);",
            params![resource_uuid, employee_id.to_string(), member_position as i64],
        )?;
    }
    Ok(())
}

fn insert_idea(
    conn: &Connection,
    project_uuid: &str,
    idea: &Idea,
    position: usize,
) -> RepoResult<()> {
    let idea_uuid = idea.id.to_string();
    conn.execute(
        "INSERT INTO ideas (
            uuid, project_uuid, name, creator_uuid, description, pros, cons,
            feasibility, impact, score, position
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
        params![
            idea_uuid,
            project_uuid,
            idea.name.as_str(),
            idea.creator_id.map(|id| id.to_string()),
            idea.description.as_deref(),
            idea.pros.as_deref(),
            idea.cons.as_deref(),
            idea.feasibility.map(Rating::get),
            idea.impact.map(Rating::get),
            idea.score,
            position as i64,
        ],
    )?;

    for (vote_position, vote) in idea.votes.iter().enumerate() {
        conn.execute(
            "INSERT INTO votes (uuid, idea_uuid, employee_uuid, score, comment, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                vote.id.to_string(),
                idea_uuid,
                vote.employee_id.to_string(),
                vote.score,
                vote.comment.as_deref(),
                vote_position as i64,
            ],
        )?;
    }
    Ok(())
}

fn insert_feedback(
    conn: &Connection,
    project_uuid: &str,
    feedback: &Feedback,
    position: usize,
) -> RepoResult<()> {
    let feedback_uuid = feedback.id.to_string();
    conn.execute(
        "INSERT INTO feedback (
            uuid, project_uuid, date, client, text, positive_points,
            improvement_points, priority, position
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        params![
            feedback_uuid,
            project_uuid,
            feedback.date,
            feedback.client.as_deref(),
            feedback.text.as_str(),
            feedback.positive_points.as_deref(),
            feedback.improvement_points.as_deref(),
            feedback.priority.as_str(),
            position as i64,
        ],
    )?;

    for (action_position, action) in feedback.actions.iter().enumerate() {
        conn.execute(
            "INSERT INTO feedback_actions (
                uuid, feedback_uuid, description, assignee_uuid, due_date, status, position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                action.id.to_string(),
                feedback_uuid,
                action.description.as_str(),
                action.assignee_id.map(|id| id.to_string()),
                action.due_date,
                action.status.as_str(),
                action_position as i64,
            ],
        )?;
    }

    for (attachment_position, attachment) in feedback.attachments.iter().enumerate() {
        insert_attachment(conn, "feedback", &feedback_uuid, attachment, attachment_position)?;
    }
    Ok(())
}

fn insert_attachment(
    conn: &Connection,
    owner_kind: &str,
    owner_uuid: &str,
    attachment: &Attachment,
    position: usize,
) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO attachments (uuid, owner_kind, owner_uuid, kind, file_name, data, position)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            attachment.id.to_string(),
            owner_kind,
            owner_uuid,
            attachment.kind.as_str(),
            attachment.file_name.as_str(),
            attachment.data.as_slice(),
            position as i64,
        ],
    )?;
    Ok(())
}

fn delete_children(conn: &Connection, project_id: ProjectId) -> RepoResult<()> {
    let project_uuid = project_id.to_string();
    // Attachments have no foreign key to their owner, so they go first.
    conn.execute(
        "DELETE FROM attachments
         WHERE (owner_kind = 'project' AND owner_uuid = ?1)
            OR (owner_kind = 'feedback'
                AND owner_uuid IN (SELECT uuid FROM feedback WHERE project_uuid = ?1));",
        [project_uuid.as_str()],
    )?;
    for table in [
        "project_employees",
        "resources",
        "tasks",
        "kpis",
        "ideas",
        "feedback",
    ] {
        conn.execute(
            &format!("DELETE FROM {table} WHERE project_uuid = ?1;"),
            [project_uuid.as_str()],
        )?;
    }
    Ok(())
}

fn load_children(conn: &Connection, project: &mut Project) -> RepoResult<()> {
    let project_uuid = project.id.to_string();

    project.employee_ids = load_ids(
        conn,
        "SELECT employee_uuid FROM project_employees
         WHERE project_uuid = ?1 ORDER BY position ASC;",
        [project_uuid.as_str()],
        "project_employees.employee_uuid",
    )?;
    project.resources = load_resources(conn, &project_uuid)?;
    project.tasks = query_tasks(
        conn,
        &format!("{TASK_SELECT_SQL} WHERE project_uuid = ?1 ORDER BY position ASC;"),
        [project_uuid.as_str()],
    )?;
    project.kpis = load_kpis(conn, &project_uuid)?;
    project.ideas = load_ideas(conn, &project_uuid)?;
    project.feedback = load_feedback(conn, &project_uuid)?;
    project.attachments = load_attachments(conn, "project", &project_uuid)?;
    Ok(())
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "projects.uuid")?;
    let status_text: String = row.get("status")?;
    let priority_text: String = row.get("priority")?;

    let mut project = Project::with_id(id, row.get::<_, String>("name")?);
    project.hourly_cost = row.get("hourly_cost")?;
    project.assigned_hours = row.get("assigned_hours")?;
    project.total_cost = row.get("total_cost")?;
    project.description = row.get("description")?;
    project.client = row.get("client")?;
    project.status = parse_stored(&status_text, "projects.status", ProjectStatus::parse)?;
    project.progress = row.get("progress")?;
    project.start_date = row.get("start_date")?;
    project.end_date = row.get("end_date")?;
    project.priority = parse_stored(&priority_text, "projects.priority", ProjectPriority::parse)?;
    project.responsible_id =
        parse_optional_uuid(row.get("responsible_uuid")?, "projects.responsible_uuid")?;
    project.estimated_budget = row.get("estimated_budget")?;
    project.resource_cost = row.get("resource_cost")?;
    project.collaborators = row.get("collaborators")?;
    project.risks = row.get("risks")?;
    project.milestones = row.get("milestones")?;
    project.dependencies = row.get("dependencies")?;
    project.comments = row.get("comments")?;
    project.auto_reminders = int_to_bool(row.get("auto_reminders")?, "projects.auto_reminders")?;
    Ok(project)
}

fn load_resources(conn: &Connection, project_uuid: &str) -> RepoResult<Vec<Resource>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, project_uuid, name, hourly_cost, assigned_hours, total_cost,
                start_date, end_date, status
         FROM resources
         WHERE project_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([project_uuid])?;
    let mut resources = Vec::new();

    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        let status_text: String = row.get("status")?;
        let employee_ids = load_ids(
            conn,
            "SELECT employee_uuid FROM resource_employees
             WHERE resource_uuid = ?1 ORDER BY position ASC;",
            [uuid_text.as_str()],
            "resource_employees.employee_uuid",
        )?;
        resources.push(Resource {
            id: parse_uuid(&uuid_text, "resources.uuid")?,
            project_id: parse_uuid(&row.get::<_, String>("project_uuid")?, "resources.project_uuid")?,
            name: row.get("name")?,
            employee_ids,
            hourly_cost: row.get("hourly_cost")?,
            assigned_hours: row.get("assigned_hours")?,
            total_cost: row.get("total_cost")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
            status: parse_stored(&status_text, "resources.status", ResourceStatus::parse)?,
        });
    }
    Ok(resources)
}

fn query_tasks(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Task>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let status_text: String = row.get("status")?;
    Ok(Task {
        id: parse_uuid(&row.get::<_, String>("uuid")?, "tasks.uuid")?,
        project_id: parse_uuid(&row.get::<_, String>("project_uuid")?, "tasks.project_uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        responsible_id: parse_optional_uuid(row.get("responsible_uuid")?, "tasks.responsible_uuid")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        status: parse_stored(&status_text, "tasks.status", TaskStatus::parse)?,
    })
}

fn load_kpis(conn: &Connection, project_uuid: &str) -> RepoResult<Vec<Kpi>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, project_uuid, name, value, target
         FROM kpis
         WHERE project_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([project_uuid])?;
    let mut kpis = Vec::new();
    while let Some(row) = rows.next()? {
        kpis.push(Kpi {
            id: parse_uuid(&row.get::<_, String>("uuid")?, "kpis.uuid")?,
            project_id: parse_uuid(&row.get::<_, String>("project_uuid")?, "kpis.project_uuid")?,
            name: row.get("name")?,
            value: row.get("value")?,
            target: row.get("target")?,
        });
    }
    Ok(kpis)
}

fn load_ideas(conn: &Connection, project_uuid: &str) -> RepoResult<Vec<Idea>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, project_uuid, name, creator_uuid, description, pros, cons,
                feasibility, impact, score
         FROM ideas
         WHERE project_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([project_uuid])?;
    let mut ideas = Vec::new();

    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        ideas.push(Idea {
            id: parse_uuid(&uuid_text, "ideas.uuid")?,
            project_id: parse_uuid(&row.get::<_, String>("project_uuid")?, "ideas.project_uuid")?,
            name: row.get("name")?,
            creator_id: parse_optional_uuid(row.get("creator_uuid")?, "ideas.creator_uuid")?,
            description: row.get("description")?,
            pros: row.get("pros")?,
            cons: row.get("cons")?,
            feasibility: parse_rating(row.get("feasibility")?, "ideas.feasibility")?,
            impact: parse_rating(row.get("impact")?, "ideas.impact")?,
            votes: load_votes(conn, &uuid_text)?,
            score: row.get("score")?,
        });
    }
    Ok(ideas)
}

fn parse_rating(value: Option<u8>, column: &str) -> RepoResult<Option<Rating>> {
    value
        .map(|raw| {
            Rating::new(raw).ok_or_else(|| {
                RepoError::InvalidData(format!("invalid rating `{raw}` in {column}"))
            })
        })
        .transpose()
}

fn load_votes(conn: &Connection, idea_uuid: &str) -> RepoResult<Vec<Vote>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, idea_uuid, employee_uuid, score, comment
         FROM votes
         WHERE idea_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([idea_uuid])?;
    let mut votes = Vec::new();
    while let Some(row) = rows.next()? {
        votes.push(Vote {
            id: parse_uuid(&row.get::<_, String>("uuid")?, "votes.uuid")?,
            idea_id: parse_uuid(&row.get::<_, String>("idea_uuid")?, "votes.idea_uuid")?,
            employee_id: parse_uuid(&row.get::<_, String>("employee_uuid")?, "votes.employee_uuid")?,
            score: row.get("score")?,
            comment: row.get("comment")?,
        });
    }
    Ok(votes)
}

fn load_feedback(conn: &Connection, project_uuid: &str) -> RepoResult<Vec<Feedback>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, project_uuid, date, client, text, positive_points,
                improvement_points, priority
         FROM feedback
         WHERE project_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([project_uuid])?;
    let mut entries = Vec::new();

    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        let id = parse_uuid(&uuid_text, "feedback.uuid")?;
        let priority_text: String = row.get("priority")?;
        entries.push(Feedback {
            id,
            project_id: parse_uuid(&row.get::<_, String>("project_uuid")?, "feedback.project_uuid")?,
            date: row.get("date")?,
            client: row.get("client")?,
            text: row.get("text")?,
            positive_points: row.get("positive_points")?,
            improvement_points: row.get("improvement_points")?,
            priority: parse_stored(&priority_text, "feedback.priority", FeedbackPriority::parse)?,
            actions: load_actions(conn, id)?,
            attachments: load_attachments(conn, "feedback", &uuid_text)?,
        });
    }
    Ok(entries)
}

fn load_actions(conn: &Connection, feedback_id: FeedbackId) -> RepoResult<Vec<FeedbackAction>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, description, assignee_uuid, due_date, status
         FROM feedback_actions
         WHERE feedback_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([feedback_id.to_string()])?;
    let mut actions = Vec::new();
    while let Some(row) = rows.next()? {
        let status_text: String = row.get("status")?;
        actions.push(FeedbackAction {
            id: parse_uuid(&row.get::<_, String>("uuid")?, "feedback_actions.uuid")?,
            feedback_id,
            description: row.get("description")?,
            assignee_id: parse_optional_uuid(
                row.get("assignee_uuid")?,
                "feedback_actions.assignee_uuid",
            )?,
            due_date: row.get("due_date")?,
            status: parse_stored(&status_text, "feedback_actions.status", ActionStatus::parse)?,
        });
    }
    Ok(actions)
}

fn load_attachments(
    conn: &Connection,
    owner_kind: &str,
    owner_uuid: &str,
) -> RepoResult<Vec<Attachment>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, kind, file_name, data
         FROM attachments
         WHERE owner_kind = ?1 AND owner_uuid = ?2
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query(params![owner_kind, owner_uuid])?;
    let mut attachments = Vec::new();
    while let Some(row) = rows.next()? {
        let kind_text: String = row.get("kind")?;
        attachments.push(Attachment {
            id: parse_uuid(&row.get::<_, String>("uuid")?, "attachments.uuid")?,
            kind: parse_stored(&kind_text, "attachments.kind", AttachmentKind::parse)?,
            file_name: row.get("file_name")?,
            data: row.get("data")?,
        });
    }
    Ok(attachments)
}
