//! Metrics report rendering.

use crate::service::metrics_service::MetricsSnapshot;
use std::fmt::Write;

/// Renders a document from a metrics snapshot.
pub trait ReportRenderer {
    fn render(&self, snapshot: &MetricsSnapshot) -> String;
}

/// Plain-text report, one `label: value` line per metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportRenderer;

impl ReportRenderer for TextReportRenderer {
    fn render(&self, snapshot: &MetricsSnapshot) -> String {
        let mut out = String::new();
        let mut line = |label: &str, value: String| {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{label:<22}{value}");
        };

        line("Report date:", snapshot.today.to_string());
        line("Total projects:", snapshot.total_projects.to_string());
        line("In progress:", snapshot.active_projects.to_string());
        line("Finished:", snapshot.finished_projects.to_string());
        line("Overdue:", snapshot.overdue_projects.to_string());
        line("Average progress:", format!("{:.2}%", snapshot.average_progress));
        line("Total budget:", format!("{:.2}", snapshot.total_budget));
        line("Actual spend:", format!("{:.2}", snapshot.actual_spend));
        line("Budget efficiency:", format!("{:.2}%", snapshot.budget_efficiency));
        line("Total tasks:", snapshot.total_tasks.to_string());
        line("Completed tasks:", snapshot.completed_tasks.to_string());
        line("Pending tasks:", snapshot.pending_tasks.to_string());
        line("Available employees:", snapshot.available_employees.to_string());
        out
    }
}

impl<R: ReportRenderer + ?Sized> ReportRenderer for &R {
    fn render(&self, snapshot: &MetricsSnapshot) -> String {
        (**self).render(snapshot)
    }
}
