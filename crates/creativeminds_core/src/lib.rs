//! Core domain logic for CreativeMinds project management.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod compute;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod report;
pub mod service;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{Availability, Employee, Team};
pub use model::feedback::{
    ActionStatus, Attachment, AttachmentKind, Feedback, FeedbackAction, FeedbackPriority,
};
pub use model::idea::{Idea, Rating, Vote};
pub use model::project::{Kpi, Project, ProjectPriority, ProjectStatus, Resource, ResourceStatus};
pub use model::task::{Task, TaskStatus};
pub use notify::{LogNotifier, Notifier, NotifyError, Recipient};
pub use repo::employee_repo::{EmployeeListQuery, EmployeeRepository, SqliteEmployeeRepository};
pub use repo::project_repo::{ProjectListQuery, ProjectRepository, SqliteProjectRepository};
pub use repo::{RepoError, RepoResult};
pub use report::{ReportRenderer, TextReportRenderer};
pub use service::employee_service::EmployeeService;
pub use service::metrics_service::{compute_metrics, MetricsService, MetricsSnapshot};
pub use service::project_service::{
    BudgetBreakdown, ProjectService, ProjectSummary, TaskCounts, INITIAL_TASK_PREFIX,
};
pub use service::{ServiceError, ServiceResult};
pub use validation::{ValidationError, ValidationFailed};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
