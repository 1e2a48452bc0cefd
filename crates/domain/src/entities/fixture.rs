//! Matches and their participants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use touchline_common::{Error, Result};
use uuid::Uuid;
use validator::Validate;

use crate::state::{MatchEvent, MatchStateMachine, MatchStatus};
use crate::validation::{require_text, validate_input};

/// Number of participants a freshly scheduled match takes
pub const MATCH_PARTICIPANTS: usize = 2;

/// Side a team plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchRole {
    Home,
    Away,
}

impl std::fmt::Display for MatchRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchRole::Home => write!(f, "HOME"),
            MatchRole::Away => write!(f, "AWAY"),
        }
    }
}

/// Match entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub match_date: DateTime<Utc>,
    pub round: i32,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fixture metadata supplied when scheduling or editing a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchDraft {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: Option<String>,
    pub location: Option<String>,
    pub match_date: DateTime<Utc>,

    #[validate(range(min = 0))]
    pub round: i32,
}

impl MatchDraft {
    pub fn validate_fields(&self) -> Result<()> {
        validate_input(self)?;
        require_text("Match title", &self.title)
    }
}

impl Match {
    /// Create a SCHEDULED match in `competition_id`
    pub fn schedule(competition_id: Uuid, draft: &MatchDraft) -> Result<Self> {
        draft.validate_fields()?;

        let now = Utc::now();
        Ok(Match {
            id: Uuid::new_v4(),
            competition_id,
            title: draft.title.trim().to_string(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            match_date: draft.match_date,
            round: draft.round,
            status: MatchStatus::Scheduled,
            home_score: None,
            away_score: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Edit fixture metadata; status and score are left alone
    pub fn apply_info(&mut self, draft: &MatchDraft) -> Result<()> {
        draft.validate_fields()?;

        self.title = draft.title.trim().to_string();
        self.description = draft.description.clone();
        self.location = draft.location.clone();
        self.match_date = draft.match_date;
        self.round = draft.round;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Move to `target`, optionally rescheduling; returns the previous status
    pub fn apply_status(
        &mut self,
        target: MatchStatus,
        match_date: Option<DateTime<Utc>>,
    ) -> Result<MatchStatus> {
        let previous = self.status;
        let event = MatchEvent::SetStatus {
            target,
            rescheduled: match_date.is_some_and(|d| d != self.match_date),
        };
        self.status = MatchStateMachine::transition(previous, event)?;
        if let Some(date) = match_date {
            self.match_date = date;
        }
        self.updated_at = Utc::now();
        Ok(previous)
    }

    /// Record the final score, forcing COMPLETED; returns the previous status
    pub fn record_score(&mut self, home_score: i32, away_score: i32) -> Result<MatchStatus> {
        if home_score < 0 || away_score < 0 {
            return Err(Error::Validation("Scores cannot be negative".to_string()));
        }

        let previous = self.status;
        self.status = MatchStateMachine::transition(previous, MatchEvent::RecordScore)?;
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.updated_at = Utc::now();
        Ok(previous)
    }
}

/// A team's slot in a match, as supplied by the organizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSpec {
    pub team_id: Uuid,
    pub role: MatchRole,
}

impl ParticipantSpec {
    pub fn home(team_id: Uuid) -> Self {
        Self {
            team_id,
            role: MatchRole::Home,
        }
    }

    pub fn away(team_id: Uuid) -> Self {
        Self {
            team_id,
            role: MatchRole::Away,
        }
    }
}

/// Check a participant list for duplicate teams
///
/// Roles are not checked: two HOME sides are accepted.
pub fn validate_participants(participants: &[ParticipantSpec]) -> Result<()> {
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant.team_id) {
            return Err(Error::Validation(format!(
                "Team {} appears more than once in the participant list",
                participant.team_id
            )));
        }
    }
    Ok(())
}

/// A team's HOME/AWAY role in a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchParticipant {
    pub id: Uuid,
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub role: MatchRole,
}

impl MatchParticipant {
    pub fn new(match_id: Uuid, spec: ParticipantSpec) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id,
            team_id: spec.team_id,
            role: spec.role,
        }
    }
}
