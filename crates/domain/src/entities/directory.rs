//! Directory records: users, teams, and players

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use touchline_common::{Error, Result};
use touchline_identity::{Actor, Role, RoleKind};
use uuid::Uuid;
use validator::{Validate, ValidateEmail};

use crate::validation::{require_text, validate_input};

/// Smallest squad a team may be created with
pub const MIN_SQUAD_SIZE: usize = 11;

/// Largest squad a team may be created with
pub const MAX_SQUAD_SIZE: usize = 25;

/// Playing position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "player_position", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl std::fmt::Display for PlayerPosition {
    #[mutants::skip] // Display text only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerPosition::Goalkeeper => write!(f, "GOALKEEPER"),
            PlayerPosition::Defender => write!(f, "DEFENDER"),
            PlayerPosition::Midfielder => write!(f, "MIDFIELDER"),
            PlayerPosition::Forward => write!(f, "FORWARD"),
        }
    }
}

/// User entity
///
/// The role is stored flat; `team_id` is only meaningful for players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: RoleKind,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation
    pub fn new(email: String, first_name: String, last_name: String, role: Role) -> Result<Self> {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }
        require_text("First name", &first_name)?;
        require_text("Last name", &last_name)?;

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            email,
            first_name,
            last_name,
            role: role.kind(),
            team_id: role.player_team(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Tagged role, rebuilt from the stored columns
    pub fn role(&self) -> Role {
        Role::from_parts(self.role, self.team_id)
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Team entity, owned by exactly one coach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub coach_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Build a team and its squad from a validated draft
    pub fn create(coach_id: Uuid, draft: &TeamDraft) -> Result<(Team, Vec<Player>)> {
        draft.validate_squad()?;

        let now = Utc::now();
        let team = Team {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            coach_id,
            created_at: now,
            updated_at: now,
        };

        let players = draft
            .players
            .iter()
            .map(|p| Player {
                id: Uuid::new_v4(),
                team_id: team.id,
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
                license_number: p.license_number.clone(),
                date_of_birth: p.date_of_birth,
                position: p.position,
                created_at: now,
                updated_at: now,
            })
            .collect();

        Ok((team, players))
    }

    pub fn is_coached_by(&self, coach_id: Uuid) -> bool {
        self.coach_id == coach_id
    }
}

/// Player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: Uuid,
    pub team_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub position: Option<PlayerPosition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a team with its initial squad
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TeamDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[validate(nested)]
    pub players: Vec<PlayerDraft>,
}

impl TeamDraft {
    /// Validate fields and the 11-25 squad size rule
    pub fn validate_squad(&self) -> Result<()> {
        validate_input(self)?;
        require_text("Team name", &self.name)?;

        let size = self.players.len();
        if !(MIN_SQUAD_SIZE..=MAX_SQUAD_SIZE).contains(&size) {
            return Err(Error::Validation(format!(
                "A team must have between {} and {} players, got {}",
                MIN_SQUAD_SIZE, MAX_SQUAD_SIZE, size
            )));
        }

        Ok(())
    }
}

/// One player of a [`TeamDraft`]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlayerDraft {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 1, max = 50))]
    pub license_number: String,

    pub date_of_birth: Option<NaiveDate>,
    pub position: Option<PlayerPosition>,
}
