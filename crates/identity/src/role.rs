//! User roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Flat role discriminant as stored alongside a user row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleKind {
    Admin,
    Organizer,
    Coach,
    Player,
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleKind::Admin => write!(f, "ADMIN"),
            RoleKind::Organizer => write!(f, "ORGANIZER"),
            RoleKind::Coach => write!(f, "COACH"),
            RoleKind::Player => write!(f, "PLAYER"),
        }
    }
}

impl FromStr for RoleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(RoleKind::Admin),
            "ORGANIZER" => Ok(RoleKind::Organizer),
            "COACH" => Ok(RoleKind::Coach),
            "PLAYER" => Ok(RoleKind::Player),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Role of a user, carrying the role-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Organizer,
    Coach,
    Player { team_id: Option<Uuid> },
}

impl Role {
    pub fn kind(&self) -> RoleKind {
        match self {
            Role::Admin => RoleKind::Admin,
            Role::Organizer => RoleKind::Organizer,
            Role::Coach => RoleKind::Coach,
            Role::Player { .. } => RoleKind::Player,
        }
    }

    /// Rebuild a role from its stored discriminant and player team
    ///
    /// The team reference is only kept for players.
    pub fn from_parts(kind: RoleKind, team_id: Option<Uuid>) -> Self {
        match kind {
            RoleKind::Admin => Role::Admin,
            RoleKind::Organizer => Role::Organizer,
            RoleKind::Coach => Role::Coach,
            RoleKind::Player => Role::Player { team_id },
        }
    }

    /// Team the user plays for, if any
    pub fn player_team(&self) -> Option<Uuid> {
        match self {
            Role::Player { team_id } => *team_id,
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    #[mutants::skip] // Delegates to RoleKind's Display
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}
