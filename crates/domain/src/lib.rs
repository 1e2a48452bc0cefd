//! League domain model for Touchline
//!
//! Entities are plain records linked by id. Relationships are resolved
//! through the store rather than held as in-memory back-pointers.

pub mod entities;
pub mod state;
pub mod validation;

pub use entities::*;
pub use state::{
    CompetitionEvent, CompetitionStateMachine, CompetitionStatus, MatchEvent, MatchSheetStatus,
    MatchStateMachine, MatchStatus, RequestEvent, RequestGuardContext, RequestStateMachine,
    RequestStatus, StateError,
};
