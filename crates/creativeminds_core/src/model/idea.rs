//! Ideas proposed for a project and the votes cast on them.

use crate::model::{EmployeeId, IdeaId, ProjectId, VoteId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// One-to-five rating used for idea feasibility and impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns the rating when `value` is within `1..=5`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Rejected rating input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct InvalidRating(pub u8);

impl TryFrom<u8> for Rating {
    type Error = InvalidRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidRating(value))
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An employee's score for one idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub idea_id: IdeaId,
    pub employee_id: EmployeeId,
    pub score: f64,
    pub comment: Option<String>,
}

impl Vote {
    pub fn new(idea_id: IdeaId, employee_id: EmployeeId, score: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            idea_id,
            employee_id,
            score,
            comment: None,
        }
    }
}

/// Idea under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub project_id: ProjectId,
    pub name: String,
    pub creator_id: Option<EmployeeId>,
    pub description: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub feasibility: Option<Rating>,
    pub impact: Option<Rating>,
    pub votes: Vec<Vote>,
    /// Derived: mean vote score, `0.0` without votes.
    pub score: f64,
}

impl Idea {
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            creator_id: None,
            description: None,
            pros: None,
            cons: None,
            feasibility: None,
            impact: None,
            votes: Vec::new(),
            score: 0.0,
        }
    }

    /// Records a vote from `employee_id` and returns its id.
    pub fn cast_vote(&mut self, employee_id: EmployeeId, score: f64) -> VoteId {
        let vote = Vote::new(self.id, employee_id, score);
        let id = vote.id;
        self.votes.push(vote);
        id
    }

    /// Deep copy with fresh identities for the idea and its votes.
    pub fn duplicate_for(&self, project_id: ProjectId) -> Self {
        let id = Uuid::new_v4();
        let votes = self
            .votes
            .iter()
            .map(|vote| Vote {
                id: Uuid::new_v4(),
                idea_id: id,
                ..vote.clone()
            })
            .collect();
        Self {
            id,
            project_id,
            votes,
            ..self.clone()
        }
    }
}
