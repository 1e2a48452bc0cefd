//! State machines for league entities
//!
//! Each state machine defines:
//! - Valid states
//! - Events that trigger transitions
//! - Guard conditions for transitions
//! - Terminal states

use serde::{Deserialize, Serialize};

pub use touchline_common::StateError;

// ============================================================================
// Competition State Machine
// ============================================================================

/// Competition lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "competition_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionStatus {
    #[default]
    Upcoming,
    Registration,
    InProgress,
    Completed,
    Cancelled,
}

impl CompetitionStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [CompetitionStatus] {
        match self {
            Self::Upcoming => &[Self::Registration, Self::Cancelled],
            Self::Registration => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Completed => &[],
            Self::Cancelled => &[],
        }
    }

    /// Whether coaches may file registration requests in this state
    pub fn accepts_registrations(&self) -> bool {
        matches!(self, Self::Upcoming | Self::Registration)
    }
}

impl std::fmt::Display for CompetitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "UPCOMING"),
            Self::Registration => write!(f, "REGISTRATION"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Events that trigger competition state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompetitionEvent {
    /// Organizer opens team registration
    OpenRegistration,
    /// Organizer kicks off play
    Start,
    /// Organizer closes the competition
    Complete,
    /// Organizer cancels the competition
    Cancel,
}

impl CompetitionEvent {
    /// The event an organizer fires by requesting `target` as the new status
    pub fn for_target(target: CompetitionStatus) -> Option<Self> {
        match target {
            CompetitionStatus::Registration => Some(Self::OpenRegistration),
            CompetitionStatus::InProgress => Some(Self::Start),
            CompetitionStatus::Completed => Some(Self::Complete),
            CompetitionStatus::Cancelled => Some(Self::Cancel),
            CompetitionStatus::Upcoming => None,
        }
    }
}

impl std::fmt::Display for CompetitionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenRegistration => write!(f, "open_registration"),
            Self::Start => write!(f, "start"),
            Self::Complete => write!(f, "complete"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Competition state machine
pub struct CompetitionStateMachine;

impl CompetitionStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: CompetitionStatus,
        event: CompetitionEvent,
    ) -> Result<CompetitionStatus, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (CompetitionStatus::Upcoming, CompetitionEvent::OpenRegistration) => {
                CompetitionStatus::Registration
            }
            (CompetitionStatus::Registration, CompetitionEvent::Start) => {
                CompetitionStatus::InProgress
            }
            (CompetitionStatus::InProgress, CompetitionEvent::Complete) => {
                CompetitionStatus::Completed
            }
            (_, CompetitionEvent::Cancel) => CompetitionStatus::Cancelled,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Move to a requested target status, validating against the transition table
    pub fn transition_to(
        current: CompetitionStatus,
        target: CompetitionStatus,
    ) -> Result<CompetitionStatus, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        match CompetitionEvent::for_target(target) {
            Some(event) => Self::transition(current, event),
            None => Err(StateError::InvalidTransition {
                from: current.to_string(),
                to: target.to_string(),
                event: "update_status".to_string(),
            }),
        }
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: CompetitionStatus, event: &CompetitionEvent) -> bool {
        Self::transition(current, *event).is_ok()
    }
}

// ============================================================================
// Competition Request State Machine
// ============================================================================

/// Resolution state of a coach's competition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "request_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [RequestStatus] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[],
            Self::Rejected => &[],
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Events that trigger request state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestEvent {
    /// Organizer approves the request
    Approve,
    /// Organizer rejects the request, or the competition is cancelled
    Reject,
}

impl std::fmt::Display for RequestEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Guard context for request transitions
#[derive(Debug, Clone)]
pub struct RequestGuardContext {
    /// Whether the competition still has room for another active team.
    /// Only consulted when approving a registration.
    pub has_capacity: bool,
}

/// Competition request state machine
pub struct RequestStateMachine;

impl RequestStateMachine {
    /// Attempt a state transition with guard conditions
    pub fn transition(
        current: RequestStatus,
        event: RequestEvent,
        context: Option<&RequestGuardContext>,
    ) -> Result<RequestStatus, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (RequestStatus::Pending, RequestEvent::Approve) => {
                // Guard: registration approvals need a free slot
                if let Some(ctx) = context {
                    if !ctx.has_capacity {
                        return Err(StateError::GuardFailed("capacity exceeded".to_string()));
                    }
                }
                RequestStatus::Approved
            }
            (RequestStatus::Pending, RequestEvent::Reject) => RequestStatus::Rejected,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(
        current: RequestStatus,
        event: &RequestEvent,
        context: Option<&RequestGuardContext>,
    ) -> bool {
        Self::transition(current, *event, context).is_ok()
    }
}

// ============================================================================
// Match State Machine
// ============================================================================

/// Match lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "match_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Postponed,
    Cancelled,
}

impl MatchStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [MatchStatus] {
        match self {
            Self::Scheduled => &[Self::InProgress, Self::Postponed, Self::Cancelled],
            Self::Postponed => &[Self::Scheduled, Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Completed => &[],
            Self::Cancelled => &[],
        }
    }

    /// Whether the match is being played right now
    pub fn is_live(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Postponed => write!(f, "POSTPONED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Events that trigger match state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    /// Organizer moves the match to `target`, optionally with a new kick-off date
    SetStatus {
        target: MatchStatus,
        rescheduled: bool,
    },
    /// Organizer records the final score
    RecordScore,
}

impl std::fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetStatus { target, .. } => write!(f, "set_status({})", target),
            Self::RecordScore => write!(f, "record_score"),
        }
    }
}

/// Match state machine
pub struct MatchStateMachine;

impl MatchStateMachine {
    /// Attempt a state transition
    ///
    /// Recording a score forces COMPLETED from any non-cancelled state,
    /// including COMPLETED itself (score correction).
    pub fn transition(current: MatchStatus, event: MatchEvent) -> Result<MatchStatus, StateError> {
        match event {
            MatchEvent::RecordScore => match current {
                MatchStatus::Cancelled => Err(StateError::TerminalState(current.to_string())),
                _ => Ok(MatchStatus::Completed),
            },
            MatchEvent::SetStatus {
                target,
                rescheduled,
            } => {
                if current.is_terminal() {
                    return Err(StateError::TerminalState(current.to_string()));
                }

                // Same status with a new date is a reschedule
                let reschedule = target == current
                    && rescheduled
                    && matches!(current, MatchStatus::Scheduled | MatchStatus::Postponed);

                if reschedule || current.valid_transitions().contains(&target) {
                    Ok(target)
                } else {
                    Err(StateError::InvalidTransition {
                        from: current.to_string(),
                        to: target.to_string(),
                        event: event.to_string(),
                    })
                }
            }
        }
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: MatchStatus, event: &MatchEvent) -> bool {
        Self::transition(current, *event).is_ok()
    }
}

// ============================================================================
// Match Sheet Status
// ============================================================================

/// Review state of a team's match sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "match_sheet_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchSheetStatus {
    #[default]
    Unvalidated,
    Ongoing,
    Submitted,
    Validated,
}

impl MatchSheetStatus {
    /// Initial status of a sheet created for a match in `match_status`
    pub fn initial_for(match_status: MatchStatus) -> Self {
        if match_status.is_live() {
            Self::Ongoing
        } else {
            Self::Unvalidated
        }
    }

    /// Sheets still awaiting organizer review
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Ongoing | Self::Submitted)
    }

    /// Status after a coach asks for `requested`
    ///
    /// Coaches can only submit; any other request leaves the status alone.
    pub fn after_coach_request(&self, requested: Option<MatchSheetStatus>) -> Self {
        match requested {
            Some(Self::Submitted) => Self::Submitted,
            _ => *self,
        }
    }
}

impl std::fmt::Display for MatchSheetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unvalidated => write!(f, "UNVALIDATED"),
            Self::Ongoing => write!(f, "ONGOING"),
            Self::Submitted => write!(f, "SUBMITTED"),
            Self::Validated => write!(f, "VALIDATED"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
