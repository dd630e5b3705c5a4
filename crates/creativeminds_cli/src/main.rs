//! CreativeMinds command-line entry point.
//!
//! # Responsibility
//! - Open the configured database and print metrics reports and project summaries.
//! - Provide a `ping` probe to verify `creativeminds_core` linkage.
//!
//! ```bash
//! creativeminds ping
//! creativeminds metrics --date 2026-06-30
//! creativeminds projects --status in_progress
//! creativeminds summary 6f1c...e2
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use creativeminds_core::{
    init_logging, open_db, Clock, CoreConfig, LogNotifier, MetricsService, ProjectListQuery,
    ProjectService, ProjectStatus, ReportRenderer, SqliteEmployeeRepository,
    SqliteProjectRepository, SystemClock, TextReportRenderer,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// CreativeMinds project management.
#[derive(Parser, Debug)]
#[command(name = "creativeminds")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database file
    #[arg(long, env = "CREATIVEMINDS_DB_PATH")]
    db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, env = "CREATIVEMINDS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "CREATIVEMINDS_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print core version and a health probe
    Ping,

    /// Print the portfolio metrics report
    Metrics {
        /// Reference date for overdue checks (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List projects ordered by name
    Projects {
        /// Filter by status (planning, in_progress, finished, stopped)
        #[arg(long, value_parser = parse_status)]
        status: Option<ProjectStatus>,
    },

    /// Print the summary of one project
    Summary {
        /// Project id
        id: Uuid,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Commands::Ping = cli.command {
        println!("creativeminds_core ping={}", creativeminds_core::ping());
        println!("creativeminds_core version={}", creativeminds_core::core_version());
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)?;
    let projects = SqliteProjectRepository::new(&conn);
    let employees = SqliteEmployeeRepository::new(&conn);

    match cli.command {
        Commands::Ping => {}
        Commands::Metrics { date } => {
            let today = date.unwrap_or_else(|| SystemClock.today());
            let snapshot = MetricsService::new(projects, employees).metrics_snapshot(today)?;
            print!("{}", TextReportRenderer.render(&snapshot));
        }
        Commands::Projects { status } => {
            let service = ProjectService::new(projects, employees, LogNotifier, SystemClock);
            let query = ProjectListQuery {
                status,
                ..ProjectListQuery::default()
            };
            for project in service.list_projects(&query)? {
                println!(
                    "{}  {:<12} {:>6.2}%  {}",
                    project.id,
                    project.status.as_str(),
                    project.progress,
                    project.name
                );
            }
        }
        Commands::Summary { id } => {
            let service = ProjectService::new(projects, employees, LogNotifier, SystemClock);
            let summary = service.project_summary(id)?;
            println!("Name:        {}", summary.name);
            println!("Status:      {}", summary.status.label());
            println!("Progress:    {:.2}%", summary.progress);
            println!(
                "Budget:      estimated {:.2} / actual {:.2} / available {:.2}",
                summary.budget.estimated, summary.budget.actual, summary.budget.available
            );
            println!(
                "Tasks:       {} total, {} completed, {} in progress, {} pending",
                summary.tasks.total,
                summary.tasks.completed,
                summary.tasks.in_progress,
                summary.tasks.pending
            );
        }
    }
    Ok(())
}

/// Environment-derived config with command-line overrides applied.
fn resolve_config(cli: &Cli) -> CliResult<CoreConfig> {
    let mut config = CoreConfig::from_env()?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = creativeminds_core::logging::normalize_level(level)?;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    Ok(config)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn parse_status(value: &str) -> Result<ProjectStatus, String> {
    ProjectStatus::parse(value).ok_or_else(|| format!("unknown project status `{value}`"))
}
