//! League entities
//!
//! Each entity validates its own fields and delegates status changes to the
//! state machines in [`crate::state`].

pub mod competition;
pub mod directory;
pub mod fixture;
pub mod registration;
pub mod sheet;

pub use competition::{
    Competition, CompetitionDraft, CompetitionFilter, CompetitionType, OrganizerSummary,
};
pub use directory::{
    Player, PlayerDraft, PlayerPosition, Team, TeamDraft, User, MAX_SQUAD_SIZE, MIN_SQUAD_SIZE,
};
pub use fixture::{
    validate_participants, Match, MatchDraft, MatchParticipant, MatchRole, ParticipantSpec,
    MATCH_PARTICIPANTS,
};
pub use registration::{
    cancellation_message, CompetitionRequest, CompetitionTeam, CompetitionTeamStatus,
    RequestFilter, RequestType,
};
pub use sheet::{
    submission_deadline, MatchSheet, ParticipationEntry, PlayerParticipation, PlayerStatus,
    SheetSummary,
};
