//! Match sheets and player participations

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::directory::PlayerPosition;
use crate::entities::fixture::Match;
use crate::state::MatchSheetStatus;

/// A team's per-match report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchSheet {
    pub id: Uuid,
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub status: MatchSheetStatus,
    pub submission_deadline: Option<NaiveDate>,
    pub validation_date: Option<DateTime<Utc>>,
    pub strategy: Option<String>,
    pub organizer_comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatchSheet {
    /// Sheet for `team_id` in `fixture`, due the day before kick-off
    pub fn for_participant(fixture: &Match, team_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            match_id: fixture.id,
            team_id,
            status: MatchSheetStatus::initial_for(fixture.status),
            submission_deadline: submission_deadline(fixture.match_date),
            validation_date: None,
            strategy: None,
            organizer_comments: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Coach edit: replace the strategy and optionally submit
    ///
    /// Returns true when the status changed.
    pub fn apply_coach_update(
        &mut self,
        strategy: Option<String>,
        requested: Option<MatchSheetStatus>,
    ) -> bool {
        let next = self.status.after_coach_request(requested);
        let changed = next != self.status;

        self.strategy = strategy;
        self.status = next;
        self.updated_at = Utc::now();
        changed
    }

    /// Organizer review: set any status and stamp the validation date
    pub fn apply_review(&mut self, status: MatchSheetStatus, comments: Option<String>) {
        let now = Utc::now();
        self.status = status;
        self.organizer_comments = comments;
        self.validation_date = Some(now);
        self.updated_at = now;
    }
}

/// Submission deadline for a match played at `match_date`
pub fn submission_deadline(match_date: DateTime<Utc>) -> Option<NaiveDate> {
    match_date.date_naive().checked_sub_days(Days::new(1))
}

/// A player's status on a match sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "player_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    #[default]
    Starter,
    Substitute,
    Injured,
    Suspended,
    Expelled,
    NotPlayed,
    Reserve,
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerStatus::Starter => write!(f, "STARTER"),
            PlayerStatus::Substitute => write!(f, "SUBSTITUTE"),
            PlayerStatus::Injured => write!(f, "INJURED"),
            PlayerStatus::Suspended => write!(f, "SUSPENDED"),
            PlayerStatus::Expelled => write!(f, "EXPELLED"),
            PlayerStatus::NotPlayed => write!(f, "NOT_PLAYED"),
            PlayerStatus::Reserve => write!(f, "RESERVE"),
        }
    }
}

/// A player's roster entry and statistics within a match sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlayerParticipation {
    pub id: Uuid,
    pub match_sheet_id: Uuid,
    pub player_id: Uuid,
    pub shirt_number: Option<i32>,
    pub status: PlayerStatus,
    pub position: Option<PlayerPosition>,
    pub goals_scored: Option<i32>,
    pub yellow_cards: Option<i32>,
    pub red_cards: Option<i32>,
    pub minutes_played: Option<i32>,
    pub substitution_in_time: Option<i32>,
    pub substitution_out_time: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Roster line supplied by a coach
///
/// Values are stored as given: no shirt-number, roster-size or statistic rules apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipationEntry {
    pub player_id: Uuid,
    pub shirt_number: Option<i32>,
    pub status: PlayerStatus,
    pub position: Option<PlayerPosition>,
    pub goals_scored: Option<i32>,
    pub yellow_cards: Option<i32>,
    pub red_cards: Option<i32>,
    pub minutes_played: Option<i32>,
    pub substitution_in_time: Option<i32>,
    pub substitution_out_time: Option<i32>,
}

impl ParticipationEntry {
    pub fn into_participation(self, match_sheet_id: Uuid) -> PlayerParticipation {
        let now = Utc::now();
        PlayerParticipation {
            id: Uuid::new_v4(),
            match_sheet_id,
            player_id: self.player_id,
            shirt_number: self.shirt_number,
            status: self.status,
            position: self.position,
            goals_scored: self.goals_scored,
            yellow_cards: self.yellow_cards,
            red_cards: self.red_cards,
            minutes_played: self.minutes_played,
            substitution_in_time: self.substitution_in_time,
            substitution_out_time: self.substitution_out_time,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Counts over a set of match sheets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub total: usize,
    /// ONGOING and SUBMITTED
    pub pending: usize,
    pub validated: usize,
}

impl SheetSummary {
    pub fn from_sheets(sheets: &[MatchSheet]) -> Self {
        Self {
            total: sheets.len(),
            pending: sheets.iter().filter(|s| s.status.is_pending()).count(),
            validated: sheets
                .iter()
                .filter(|s| s.status == MatchSheetStatus::Validated)
                .count(),
        }
    }
}
