//! Employee and team records.
//!
//! # Invariants
//! - `national_id` is unique across all employees (case-insensitive).
//! - `contact` is the addressing key handed to the notifier.
//! - `Team::size` is derived from `member_ids`.

use crate::model::{EmployeeId, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staffing availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Available,
    Assigned,
    Partial,
    Unavailable,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Assigned => "assigned",
            Self::Partial => "partial",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Self::Available),
            "assigned" => Some(Self::Assigned),
            "partial" => Some(Self::Partial),
            "unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub first_surname: Option<String>,
    pub second_surname: Option<String>,
    /// Eight digits followed by one letter, e.g. `12345678Z`.
    pub national_id: String,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Contact identity used to address messages and activities.
    pub contact: String,
    pub availability: Availability,
}

impl Employee {
    /// Creates an available employee whose contact identity defaults to `name`.
    pub fn new(name: impl Into<String>, national_id: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            contact: name.clone(),
            name,
            first_surname: None,
            second_surname: None,
            national_id: national_id.into(),
            birth_date: None,
            hire_date: None,
            department: None,
            position: None,
            phone: None,
            email: None,
            availability: Availability::Available,
        }
    }

    /// Name followed by surnames, skipping missing parts.
    pub fn full_name(&self) -> String {
        [
            Some(self.name.as_str()),
            self.first_surname.as_deref(),
            self.second_surname.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub member_ids: Vec<EmployeeId>,
    pub responsible_id: Option<EmployeeId>,
    pub description: Option<String>,
    /// Derived: number of members.
    pub size: usize,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            member_ids: Vec::new(),
            responsible_id: None,
            description: None,
            size: 0,
        }
    }
}
