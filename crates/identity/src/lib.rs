//! Caller identity for Touchline
//!
//! Authentication happens outside the league core. By the time a workflow
//! runs, the caller is an [`Actor`]: a user id plus a tagged [`Role`].

pub mod actor;
pub mod role;

pub use actor::{ensure_owner, Actor};
pub use role::{Role, RoleKind};
