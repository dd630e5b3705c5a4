#![allow(dead_code)]

use chrono::NaiveDate;
use creativeminds_core::{
    Employee, EmployeeRepository, FixedClock, Notifier, NotifyError, Project, Recipient,
    SqliteEmployeeRepository,
};
use rusqlite::Connection;
use std::cell::RefCell;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Every service test runs on 2026-03-01.
pub fn today() -> NaiveDate {
    date(2026, 3, 1)
}

pub fn clock() -> FixedClock {
    FixedClock(today())
}

/// Inserts an adult, available employee directly through the repository.
pub fn seed_employee(conn: &Connection, name: &str, national_id: &str) -> Employee {
    let mut employee = Employee::new(name, national_id);
    employee.birth_date = Some(date(1990, 6, 15));
    SqliteEmployeeRepository::new(conn)
        .create_employee(&employee)
        .unwrap();
    employee
}

/// Planning project that passes every project rule.
pub fn planning_project(name: &str, responsible: &Employee) -> Project {
    let mut project = Project::new(name);
    project.responsible_id = Some(responsible.id);
    project.description = Some("Spring campaign for a returning client".to_string());
    project.client = Some("Acme Studio".to_string());
    project.estimated_budget = 10_000.0;
    project.start_date = Some(date(2026, 3, 1));
    project.end_date = Some(date(2026, 9, 30));
    project
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message {
        contact: String,
        subject: String,
        body: String,
    },
    Activity {
        contact: String,
        summary: String,
        note: String,
    },
}

/// Notifier double that records every dispatch, optionally failing each one.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<Sent>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.borrow().clone()
    }

    fn record(&self, entry: Sent) -> Result<(), NotifyError> {
        self.sent.borrow_mut().push(entry);
        if self.fail {
            return Err(NotifyError("mail relay offline".to_string()));
        }
        Ok(())
    }
}

impl Notifier for RecordingNotifier {
    fn post_message(
        &self,
        recipient: &Recipient,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError> {
        self.record(Sent::Message {
            contact: recipient.contact.clone(),
            subject: subject.to_string(),
            body: body.to_string(),
        })
    }

    fn schedule_activity(
        &self,
        recipient: &Recipient,
        summary: &str,
        note: &str,
    ) -> Result<(), NotifyError> {
        self.record(Sent::Activity {
            contact: recipient.contact.clone(),
            summary: summary.to_string(),
            note: note.to_string(),
        })
    }
}
