//! Common state machine error types
//!
//! Shared across all domain crates that implement state machines.

use thiserror::Error;

use crate::error::Error as CommonError;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} to {to} via {event}")]
    InvalidTransition {
        from: String,
        to: String,
        event: String,
    },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

impl From<StateError> for CommonError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::GuardFailed(reason) => CommonError::Validation(reason),
            other => CommonError::Validation(other.to_string()),
        }
    }
}
