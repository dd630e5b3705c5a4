mod common;

use common::{clock, date, planning_project, seed_employee, today, RecordingNotifier, Sent};
use creativeminds_core::db::open_db_in_memory;
use creativeminds_core::{
    ActionStatus, Attachment, AttachmentKind, Feedback, FeedbackAction, FixedClock, Idea, Kpi,
    Project, ProjectListQuery, ProjectPriority, ProjectRepository, ProjectService, ProjectStatus,
    Resource, ResourceStatus, ServiceError, SqliteEmployeeRepository, SqliteProjectRepository,
    Task, TaskCounts, TaskStatus, ValidationError, INITIAL_TASK_PREFIX,
};
use rusqlite::Connection;
use uuid::Uuid;

type Service<'a> = ProjectService<
    SqliteProjectRepository<'a>,
    SqliteEmployeeRepository<'a>,
    &'a RecordingNotifier,
    FixedClock,
>;

fn service<'a>(conn: &'a Connection, notifier: &'a RecordingNotifier) -> Service<'a> {
    service_at(conn, notifier, clock())
}

fn service_at<'a>(
    conn: &'a Connection,
    notifier: &'a RecordingNotifier,
    clock: FixedClock,
) -> Service<'a> {
    ProjectService::new(
        SqliteProjectRepository::new(conn),
        SqliteEmployeeRepository::new(conn),
        notifier,
        clock,
    )
}

/// Project ready to move to in-progress: one resource and two tasks, one done.
fn staffed_project(name: &str, responsible: &creativeminds_core::Employee) -> Project {
    let mut project = planning_project(name, responsible);
    let mut resource = Resource::new(project.id, "Art direction");
    resource.hourly_cost = 40.0;
    resource.assigned_hours = 10.0;
    resource.status = ResourceStatus::Assigned;
    project.add_resource(resource);

    let mut sketches = Task::new(project.id, "Sketches");
    sketches.status = TaskStatus::Completed;
    sketches.start_date = Some(date(2026, 3, 2));
    sketches.end_date = Some(date(2026, 3, 6));
    project.add_task(sketches);
    let mut layout = Task::new(project.id, "Layout");
    layout.status = TaskStatus::InProgress;
    project.add_task(layout);
    project
}

#[test]
fn create_requires_known_responsible() {
    let conn = open_db_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let orphan = Project::new("No owner");
    assert!(matches!(
        service.create_project(orphan),
        Err(ServiceError::MissingResponsible)
    ));

    let mut stranger = Project::new("Unknown owner");
    let unknown = Uuid::new_v4();
    stranger.responsible_id = Some(unknown);
    stranger.estimated_budget = 1_000.0;
    assert!(matches!(
        service.create_project(stranger),
        Err(ServiceError::UnknownEmployee(id)) if id == unknown
    ));
    assert!(notifier.sent().is_empty());
}

#[test]
fn create_with_reminders_adds_initial_task_and_notifies() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let mut project = planning_project("Poster series", &owner);
    project.auto_reminders = true;
    let created = service.create_project(project).unwrap();

    assert_eq!(created.tasks.len(), 1);
    let initial = &created.tasks[0];
    assert_eq!(
        initial.name,
        format!("{INITIAL_TASK_PREFIX}Poster series")
    );
    assert_eq!(initial.name, "Initial task for project: Poster series");
    assert_eq!(initial.responsible_id, Some(owner.id));
    assert_eq!(initial.status, TaskStatus::Pending);
    assert_eq!(service.get_project(created.id).unwrap(), created);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(&sent[0], Sent::Message { contact, subject, .. }
        if contact == "Lucia" && subject == "Reminder: Project Poster series - pending tasks"));
    assert!(matches!(&sent[1], Sent::Activity { contact, summary, .. }
        if contact == "Lucia" && summary == "Reminder: Poster series - pending tasks"));
}

#[test]
fn create_without_reminders_stays_quiet() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let created = service
        .create_project(planning_project("Quiet", &owner))
        .unwrap();
    assert!(created.tasks.is_empty());
    assert!(notifier.sent().is_empty());
}

#[test]
fn notification_failure_does_not_fail_the_write() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::failing();
    let service = service(&conn, &notifier);

    let mut project = planning_project("Offline relay", &owner);
    project.auto_reminders = true;
    let created = service.create_project(project).unwrap();

    assert_eq!(notifier.sent().len(), 2);
    assert!(service.get_project(created.id).is_ok());
}

#[test]
fn validation_collects_every_violation() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let mut project = planning_project("Sloppy", &owner);
    project.priority = ProjectPriority::High;
    project.description = Some("short".to_string());
    project.hourly_cost = -5.0;

    let err = service.create_project(project).unwrap_err();
    match err {
        ServiceError::Validation(failed) => {
            assert_eq!(failed.errors.len(), 4);
            assert!(failed.contains(|e| matches!(e, ValidationError::NegativeCostOrHours { .. })));
            assert!(failed.contains(|e| matches!(e, ValidationError::DescriptionTooShort { .. })));
            assert!(failed.contains(|e| *e == ValidationError::MissingRisks));
            assert!(failed.contains(|e| *e == ValidationError::MissingMilestones));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn change_status_validates_and_notifies() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let created = service
        .create_project(staffed_project("Catalog", &owner))
        .unwrap();
    let moved = service
        .change_status(created.id, ProjectStatus::InProgress)
        .unwrap();

    assert_eq!(moved.status, ProjectStatus::InProgress);
    assert_eq!(
        service.get_project(created.id).unwrap().status,
        ProjectStatus::InProgress
    );
    assert_eq!(
        notifier.sent(),
        vec![Sent::Message {
            contact: "Lucia".to_string(),
            subject: "Status change: Project Catalog".to_string(),
            body: "Hello Lucia, the status of project Catalog changed to In progress. \
                   Current progress: 50.00%"
                .to_string(),
        }]
    );
}

#[test]
fn change_status_rejects_unready_project() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let created = service
        .create_project(planning_project("Empty", &owner))
        .unwrap();
    let err = service
        .change_status(created.id, ProjectStatus::InProgress)
        .unwrap_err();

    match err {
        ServiceError::Validation(failed) => assert_eq!(
            failed.errors,
            vec![ValidationError::MissingResources, ValidationError::MissingTasks]
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        service.get_project(created.id).unwrap().status,
        ProjectStatus::Planning
    );
    assert!(notifier.sent().is_empty());
}

#[test]
fn duplicate_copies_graph_and_resets_states() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let mut original = staffed_project("Exhibit", &owner);
    original.auto_reminders = true;
    original.add_kpi(Kpi::new(original.id, "Visitors", 5_000.0));
    let mut idea = Idea::new(original.id, "QR audio guide");
    idea.cast_vote(owner.id, 5.0);
    original.add_idea(idea);
    let mut feedback = Feedback::new(original.id, date(2026, 2, 20), "Signage too small");
    feedback.add_action(FeedbackAction::new(feedback.id, "Enlarge signage"));
    feedback.attachments.push(Attachment::new(
        AttachmentKind::Additional,
        "signage.jpg",
        vec![0xFF, 0xD8, 0xFF, 0xE0],
    ));
    original.add_feedback(feedback);
    original.attachments.push(Attachment::new(
        AttachmentKind::Documentation,
        "floor-plan.pdf",
        b"%PDF-1.7".to_vec(),
    ));
    original.recompute();
    SqliteProjectRepository::new(&conn)
        .create_project(&original)
        .unwrap();

    let copy = service.duplicate_project(original.id).unwrap();

    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "Exhibit (copy)");
    assert_eq!(copy.status, ProjectStatus::Planning);
    assert_eq!(copy.tasks.len(), 2);
    assert!(copy.tasks.iter().all(|task| task.status == TaskStatus::Pending));
    assert!(copy.tasks.iter().all(|task| task.project_id == copy.id));
    assert_eq!(copy.resources.len(), 1);
    assert_eq!(copy.resources[0].status, ResourceStatus::Draft);
    assert_eq!(copy.resources[0].total_cost, 400.0);
    assert_eq!(copy.progress, 0.0);
    assert_eq!(copy.ideas[0].votes.len(), 1);
    assert_ne!(copy.ideas[0].id, original.ideas[0].id);
    assert_eq!(copy.feedback[0].actions.len(), 1);
    assert_ne!(copy.feedback[0].actions[0].id, original.feedback[0].actions[0].id);
    assert_eq!(copy.kpis.len(), 1);

    let copied_note = &copy.feedback[0].attachments[0];
    let source_note = &original.feedback[0].attachments[0];
    assert_ne!(copied_note.id, source_note.id);
    assert_eq!(copied_note.file_name, "signage.jpg");
    assert_eq!(copied_note.data, source_note.data);
    assert_eq!(copy.attachments.len(), 1);
    assert_ne!(copy.attachments[0].id, original.attachments[0].id);
    assert_eq!(copy.attachments[0].kind, AttachmentKind::Documentation);
    assert_eq!(copy.attachments[0].data, b"%PDF-1.7".to_vec());

    // Both graphs reload with their own attachment rows.
    let reloaded_copy = service.get_project(copy.id).unwrap();
    assert_eq!(reloaded_copy.feedback[0].attachments, copy.feedback[0].attachments);
    assert_eq!(reloaded_copy.attachments, copy.attachments);
    assert_eq!(service.get_project(copy.id).unwrap(), copy);
    assert_eq!(service.get_project(original.id).unwrap(), original);
    assert!(notifier.sent().is_empty());
}

#[test]
fn duplicate_requires_a_responsible_employee() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let mut created = service
        .create_project(planning_project("Orphan", &owner))
        .unwrap();
    created.responsible_id = None;
    let unowned = service.update_project(created).unwrap();

    assert!(matches!(
        service.duplicate_project(unowned.id),
        Err(ServiceError::MissingResponsible)
    ));

    let ghost = Uuid::new_v4();
    let mut reassigned = unowned.clone();
    reassigned.responsible_id = Some(ghost);
    SqliteProjectRepository::new(&conn)
        .update_project(&reassigned)
        .unwrap();
    assert!(matches!(
        service.duplicate_project(unowned.id),
        Err(ServiceError::UnknownEmployee(id)) if id == ghost
    ));

    let stored = service.list_projects(&ProjectListQuery::default()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, unowned.id);
}

#[test]
fn feedback_action_due_dates_are_checked_on_change_only() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let mut project = planning_project("Packaging", &owner);
    let feedback_id = project.add_feedback(Feedback::new(project.id, today(), "Box is flimsy"));
    let created = service.create_project(project).unwrap();

    let mut late = FeedbackAction::new(feedback_id, "Thicker board");
    late.due_date = Some(date(2026, 2, 28));
    let err = service
        .add_feedback_action(created.id, feedback_id, late)
        .unwrap_err();
    assert!(matches!(&err, ServiceError::Validation(failed)
        if failed.errors == vec![ValidationError::DueDateInPast { due_date: date(2026, 2, 28), today: today() }]));

    let mut on_time = FeedbackAction::new(feedback_id, "Thicker board");
    on_time.due_date = Some(date(2026, 3, 15));
    let action_id = service
        .add_feedback_action(created.id, feedback_id, on_time)
        .unwrap();

    // A month later the action is past due, yet unrelated saves still succeed.
    let later = service_at(&conn, &notifier, FixedClock(date(2026, 4, 15)));
    let mut stored = later.get_project(created.id).unwrap();
    stored.comments = Some("Supplier confirmed".to_string());
    later.update_project(stored).unwrap();
    later
        .set_feedback_action_status(created.id, feedback_id, action_id, ActionStatus::Done)
        .unwrap();

    let reloaded = later.get_project(created.id).unwrap();
    let action = reloaded.feedback[0].action(action_id).unwrap();
    assert_eq!(action.status, ActionStatus::Done);

    // Moving the due date is a change and is checked again.
    let mut moved = reloaded.clone();
    moved.feedback[0].actions[0].due_date = Some(date(2026, 4, 1));
    assert!(matches!(
        later.update_project(moved),
        Err(ServiceError::Validation(_))
    ));
}

#[test]
fn missing_targets_are_reported() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let ghost = planning_project("Ghost", &owner);
    assert!(matches!(
        service.update_project(ghost.clone()),
        Err(ServiceError::ProjectNotFound(id)) if id == ghost.id
    ));

    let created = service
        .create_project(planning_project("Real", &owner))
        .unwrap();
    let missing_feedback = Uuid::new_v4();
    assert!(matches!(
        service.add_feedback_action(
            created.id,
            missing_feedback,
            FeedbackAction::new(missing_feedback, "noop")
        ),
        Err(ServiceError::FeedbackNotFound(id)) if id == missing_feedback
    ));
    assert!(matches!(
        service.set_feedback_action_status(
            created.id,
            missing_feedback,
            Uuid::new_v4(),
            ActionStatus::Done
        ),
        Err(ServiceError::FeedbackNotFound(id)) if id == missing_feedback
    ));

    let mut project = service.get_project(created.id).unwrap();
    let feedback_id = project.add_feedback(Feedback::new(project.id, today(), "Colors are off"));
    service.update_project(project).unwrap();
    let missing_action = Uuid::new_v4();
    assert!(matches!(
        service.set_feedback_action_status(
            created.id,
            feedback_id,
            missing_action,
            ActionStatus::Done
        ),
        Err(ServiceError::ActionNotFound(id)) if id == missing_action
    ));
}

#[test]
fn project_summary_reports_budget_and_task_counts() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_employee(&conn, "Lucia", "12345678Z");
    let notifier = RecordingNotifier::default();
    let service = service(&conn, &notifier);

    let created = service
        .create_project(staffed_project("Annual report", &owner))
        .unwrap();
    let summary = service.project_summary(created.id).unwrap();

    assert_eq!(summary.name, "Annual report");
    assert_eq!(summary.status, ProjectStatus::Planning);
    assert_eq!(summary.progress, 50.0);
    assert_eq!(summary.budget.estimated, 10_000.0);
    assert_eq!(summary.budget.actual, 400.0);
    assert_eq!(summary.budget.available, 9_600.0);
    assert_eq!(
        summary.tasks,
        TaskCounts {
            total: 2,
            completed: 1,
            in_progress: 1,
            pending: 0
        }
    );
}
