//! Competition membership and coach requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{
    RequestEvent, RequestGuardContext, RequestStateMachine, RequestStatus, StateError,
};

/// Status of a team inside a competition
///
/// Organizers may set any value directly; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "competition_team_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionTeamStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    InVerification,
    Rejected,
    Disqualified,
}

impl std::fmt::Display for CompetitionTeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionTeamStatus::Active => write!(f, "ACTIVE"),
            CompetitionTeamStatus::Inactive => write!(f, "INACTIVE"),
            CompetitionTeamStatus::Suspended => write!(f, "SUSPENDED"),
            CompetitionTeamStatus::InVerification => write!(f, "IN_VERIFICATION"),
            CompetitionTeamStatus::Rejected => write!(f, "REJECTED"),
            CompetitionTeamStatus::Disqualified => write!(f, "DISQUALIFIED"),
        }
    }
}

/// Membership of a team in a competition; at most one per pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompetitionTeam {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub team_id: Uuid,
    pub status: CompetitionTeamStatus,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompetitionTeam {
    /// New ACTIVE membership
    pub fn new(competition_id: Uuid, team_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            competition_id,
            team_id,
            status: CompetitionTeamStatus::Active,
            joined_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CompetitionTeamStatus::Active
    }
}

/// Kind of coach request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Registration,
    Withdrawal,
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestType::Registration => write!(f, "REGISTRATION"),
            RequestType::Withdrawal => write!(f, "WITHDRAWAL"),
        }
    }
}

/// A coach's request to join or leave a competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompetitionRequest {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub team_id: Uuid,
    pub coach_id: Uuid,
    pub request_type: RequestType,
    pub request_status: RequestStatus,
    pub reason: Option<String>,
    pub response_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl CompetitionRequest {
    /// New PENDING request
    pub fn new(
        competition_id: Uuid,
        team_id: Uuid,
        coach_id: Uuid,
        request_type: RequestType,
        reason: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            competition_id,
            team_id,
            coach_id,
            request_type,
            request_status: RequestStatus::Pending,
            reason,
            response_message: None,
            created_at: now,
            updated_at: now,
            processed_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.request_status == RequestStatus::Pending
    }

    /// Approve or reject, stamping the response and processing time
    ///
    /// `guard` carries the capacity check for registration approvals.
    pub fn resolve(
        &mut self,
        approved: bool,
        response_message: Option<String>,
        guard: Option<&RequestGuardContext>,
    ) -> Result<RequestStatus, StateError> {
        let event = if approved {
            RequestEvent::Approve
        } else {
            RequestEvent::Reject
        };
        let next = RequestStateMachine::transition(self.request_status, event, guard)?;

        let now = Utc::now();
        self.request_status = next;
        self.response_message = response_message;
        self.processed_at = Some(now);
        self.updated_at = now;
        Ok(next)
    }

    /// Reject because the competition was cancelled
    pub fn reject_for_cancellation(&mut self, reason: &str) -> Result<RequestStatus, StateError> {
        self.resolve(false, Some(cancellation_message(reason)), None)
    }
}

/// Response message stamped on requests swept by a cancellation
pub fn cancellation_message(reason: &str) -> String {
    format!("Competition cancelled: {}", reason)
}

/// Optional filters for request listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestFilter {
    pub competition_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub coach_id: Option<Uuid>,
    pub request_type: Option<RequestType>,
    pub request_status: Option<RequestStatus>,
}

impl RequestFilter {
    pub fn for_competition(competition_id: Uuid) -> Self {
        Self {
            competition_id: Some(competition_id),
            ..Default::default()
        }
    }

    pub fn for_coach(coach_id: Uuid) -> Self {
        Self {
            coach_id: Some(coach_id),
            ..Default::default()
        }
    }

    /// PENDING requests of one kind for a (team, competition) pair
    pub fn pending(team_id: Uuid, competition_id: Uuid, request_type: RequestType) -> Self {
        Self {
            competition_id: Some(competition_id),
            team_id: Some(team_id),
            coach_id: None,
            request_type: Some(request_type),
            request_status: Some(RequestStatus::Pending),
        }
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.request_status = Some(status);
        self
    }

    pub fn matches(&self, request: &CompetitionRequest) -> bool {
        self.competition_id.map_or(true, |id| id == request.competition_id)
            && self.team_id.map_or(true, |id| id == request.team_id)
            && self.coach_id.map_or(true, |id| id == request.coach_id)
            && self.request_type.map_or(true, |t| t == request.request_type)
            && self
                .request_status
                .map_or(true, |s| s == request.request_status)
    }
}
