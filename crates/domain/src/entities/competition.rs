//! Competition entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use touchline_common::Result;
use uuid::Uuid;
use validator::Validate;

use crate::state::{CompetitionStateMachine, CompetitionStatus, StateError};
use crate::validation::{require_text, validate_date_order, validate_input};

/// Competition format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "competition_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionType {
    League,
    #[default]
    Tournament,
    Cup,
}

impl std::fmt::Display for CompetitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionType::League => write!(f, "LEAGUE"),
            CompetitionType::Tournament => write!(f, "TOURNAMENT"),
            CompetitionType::Cup => write!(f, "CUP"),
        }
    }
}

/// Competition entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Competition {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub competition_type: CompetitionType,
    pub status: CompetitionStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub registration_deadline: Option<NaiveDate>,
    /// Team cap; `None` means unlimited
    pub max_teams: Option<i32>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable competition fields, used for both creation and detail updates
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CompetitionDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,

    /// Defaults to TOURNAMENT on creation; left unchanged on update when absent
    pub competition_type: Option<CompetitionType>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub registration_deadline: Option<NaiveDate>,

    #[validate(range(min = 2))]
    pub max_teams: Option<i32>,

    pub location: Option<String>,
    pub category: Option<String>,
}

impl CompetitionDraft {
    pub fn validate_fields(&self) -> Result<()> {
        validate_input(self)?;
        require_text("Competition name", &self.name)?;
        validate_date_order(self.start_date, self.end_date, self.registration_deadline)
    }
}

impl Competition {
    /// Create a new UPCOMING competition owned by `organizer_id`
    pub fn create(organizer_id: Uuid, draft: &CompetitionDraft) -> Result<Self> {
        draft.validate_fields()?;

        let now = Utc::now();
        Ok(Competition {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            description: draft.description.clone(),
            competition_type: draft.competition_type.unwrap_or_default(),
            status: CompetitionStatus::Upcoming,
            start_date: draft.start_date,
            end_date: draft.end_date,
            registration_deadline: draft.registration_deadline,
            max_teams: draft.max_teams,
            location: draft.location.clone(),
            category: draft.category.clone(),
            organizer_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the editable details; status is never touched here
    pub fn apply_details(&mut self, draft: &CompetitionDraft) -> Result<()> {
        draft.validate_fields()?;

        self.name = draft.name.trim().to_string();
        self.description = draft.description.clone();
        if let Some(competition_type) = draft.competition_type {
            self.competition_type = competition_type;
        }
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.registration_deadline = draft.registration_deadline;
        self.max_teams = draft.max_teams;
        self.location = draft.location.clone();
        self.category = draft.category.clone();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Move to `target`, returning the previous status
    pub fn apply_status(
        &mut self,
        target: CompetitionStatus,
    ) -> std::result::Result<CompetitionStatus, StateError> {
        let previous = self.status;
        self.status = CompetitionStateMachine::transition_to(previous, target)?;
        self.updated_at = Utc::now();
        Ok(previous)
    }

    pub fn is_owned_by(&self, organizer_id: Uuid) -> bool {
        self.organizer_id == organizer_id
    }

    pub fn accepts_registrations(&self) -> bool {
        self.status.accepts_registrations()
    }

    /// Whether one more active team fits under the cap
    pub fn has_capacity(&self, active_teams: i64) -> bool {
        match self.max_teams {
            Some(max) => active_teams < i64::from(max),
            None => true,
        }
    }
}

/// Optional filters for competition listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitionFilter {
    pub status: Option<CompetitionStatus>,
    pub competition_type: Option<CompetitionType>,
}

impl CompetitionFilter {
    pub fn matches(&self, competition: &Competition) -> bool {
        self.status.map_or(true, |s| s == competition.status)
            && self
                .competition_type
                .map_or(true, |t| t == competition.competition_type)
    }
}

/// Per-status counts of an organizer's competitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerSummary {
    pub total: usize,
    /// UPCOMING and REGISTRATION
    pub upcoming: usize,
    pub active: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl OrganizerSummary {
    pub fn from_competitions(competitions: &[Competition]) -> Self {
        let mut summary = OrganizerSummary {
            total: competitions.len(),
            ..Default::default()
        };
        for competition in competitions {
            match competition.status {
                CompetitionStatus::Upcoming | CompetitionStatus::Registration => {
                    summary.upcoming += 1
                }
                CompetitionStatus::InProgress => summary.active += 1,
                CompetitionStatus::Completed => summary.completed += 1,
                CompetitionStatus::Cancelled => summary.cancelled += 1,
            }
        }
        summary
    }
}
