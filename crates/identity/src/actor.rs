//! Authorization context for a resolved caller

use serde::{Deserialize, Serialize};
use touchline_common::{Error, Result};
use uuid::Uuid;

use crate::role::{Role, RoleKind};

/// A resolved caller: who is acting and in which role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn organizer(user_id: Uuid) -> Self {
        Self::new(user_id, Role::Organizer)
    }

    pub fn coach(user_id: Uuid) -> Self {
        Self::new(user_id, Role::Coach)
    }

    pub fn has_role(&self, kind: RoleKind) -> bool {
        self.role.kind() == kind
    }

    pub fn is_organizer(&self) -> bool {
        self.has_role(RoleKind::Organizer)
    }

    pub fn is_coach(&self) -> bool {
        self.has_role(RoleKind::Coach)
    }

    /// Check whether this actor is the owner recorded on a resource
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }

    /// Fail with `Authorization` unless this actor owns the resource
    pub fn ensure_owns(&self, owner_id: Uuid, resource: &str) -> Result<()> {
        ensure_owner(self.user_id, owner_id, resource)
    }
}

/// Fail with `Authorization` unless `caller_id` is the recorded owner
pub fn ensure_owner(caller_id: Uuid, owner_id: Uuid, resource: &str) -> Result<()> {
    if caller_id == owner_id {
        return Ok(());
    }

    tracing::warn!(
        caller_id = %caller_id,
        owner_id = %owner_id,
        resource,
        "Ownership check failed"
    );
    Err(Error::Authorization(format!(
        "Caller does not own this {}",
        resource
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let organizer = Actor::organizer(Uuid::new_v4());
        let coach = Actor::coach(Uuid::new_v4());

        assert!(organizer.is_organizer());
        assert!(!organizer.is_coach());
        assert!(coach.is_coach());
        assert!(!coach.is_organizer());
        assert!(!Actor::new(Uuid::new_v4(), Role::Admin).is_organizer());
    }

    #[test]
    fn test_ensure_owns() {
        let owner = Uuid::new_v4();
        let actor = Actor::organizer(owner);

        assert!(actor.owns(owner));
        assert!(actor.ensure_owns(owner, "competition").is_ok());

        // Kill mutant: replace == with != in ensure_owner
        let err = actor.ensure_owns(Uuid::new_v4(), "competition").unwrap_err();
        match err {
            Error::Authorization(msg) => assert_eq!(msg, "Caller does not own this competition"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_actor_serializes_flat() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(Actor::coach(id)).unwrap();
        assert_eq!(json["role"], "COACH");
        assert_eq!(json["user_id"], id.to_string());
    }
}
