//! Caller resolution and ownership checks shared by the workflows
//!
//! A caller id resolves only when the user exists with the expected role;
//! anything else reads as "not found", the same as a role-filtered lookup.

use touchline_common::{Error, Result};
use touchline_domain::{Competition, Match, MatchSheet, Team};
use touchline_identity::{Actor, RoleKind};
use uuid::Uuid;

use crate::repository::LeagueTx;

async fn require_role(
    tx: &mut dyn LeagueTx,
    user_id: Uuid,
    kind: RoleKind,
    label: &str,
) -> Result<Actor> {
    match tx.find_user(user_id).await? {
        Some(user) if user.role == kind => Ok(user.actor()),
        _ => {
            tracing::debug!(user_id = %user_id, expected_role = %kind, "Caller did not resolve");
            Err(Error::NotFound(format!("{} not found", label)))
        }
    }
}

/// Resolve `user_id` as an organizer
pub async fn require_organizer(tx: &mut dyn LeagueTx, user_id: Uuid) -> Result<Actor> {
    require_role(tx, user_id, RoleKind::Organizer, "Organizer").await
}

/// Resolve `user_id` as a coach
pub async fn require_coach(tx: &mut dyn LeagueTx, user_id: Uuid) -> Result<Actor> {
    require_role(tx, user_id, RoleKind::Coach, "Coach").await
}

/// Load a competition
pub async fn find_competition(tx: &mut dyn LeagueTx, competition_id: Uuid) -> Result<Competition> {
    tx.find_competition(competition_id)
        .await?
        .ok_or_else(|| Error::NotFound("Competition not found".to_string()))
}

/// Load a competition and hold its row lock until the transaction ends
///
/// Request filing takes this lock so that a concurrent cancellation either
/// sees the new request or is seen by it.
pub async fn locked_competition(
    tx: &mut dyn LeagueTx,
    competition_id: Uuid,
) -> Result<Competition> {
    tx.lock_competition(competition_id)
        .await?
        .ok_or_else(|| Error::NotFound("Competition not found".to_string()))
}

/// Load a competition the actor organizes
///
/// With `lock`, the competition row stays locked until the transaction ends.
pub async fn owned_competition(
    tx: &mut dyn LeagueTx,
    actor: &Actor,
    competition_id: Uuid,
    lock: bool,
) -> Result<Competition> {
    let competition = if lock {
        tx.lock_competition(competition_id).await?
    } else {
        tx.find_competition(competition_id).await?
    }
    .ok_or_else(|| Error::NotFound("Competition not found".to_string()))?;

    actor.ensure_owns(competition.organizer_id, "competition")?;
    Ok(competition)
}

/// Load a team the actor coaches
pub async fn coached_team(tx: &mut dyn LeagueTx, actor: &Actor, team_id: Uuid) -> Result<Team> {
    let team = tx
        .find_team(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    actor.ensure_owns(team.coach_id, "team")?;
    Ok(team)
}

/// Load a match
pub async fn find_match(tx: &mut dyn LeagueTx, match_id: Uuid) -> Result<Match> {
    tx.find_match(match_id)
        .await?
        .ok_or_else(|| Error::NotFound("Match not found".to_string()))
}

/// Load a match whose competition the actor organizes
pub async fn owned_match(
    tx: &mut dyn LeagueTx,
    actor: &Actor,
    match_id: Uuid,
) -> Result<(Match, Competition)> {
    let fixture = find_match(tx, match_id).await?;
    let competition = owned_competition(tx, actor, fixture.competition_id, false).await?;
    Ok((fixture, competition))
}

/// Load a match sheet
pub async fn find_sheet(tx: &mut dyn LeagueTx, sheet_id: Uuid) -> Result<MatchSheet> {
    tx.find_sheet(sheet_id)
        .await?
        .ok_or_else(|| Error::NotFound("Match sheet not found".to_string()))
}

/// Load a match sheet belonging to a team the actor coaches
pub async fn coached_sheet(
    tx: &mut dyn LeagueTx,
    actor: &Actor,
    sheet_id: Uuid,
) -> Result<MatchSheet> {
    let sheet = find_sheet(tx, sheet_id).await?;
    coached_team(tx, actor, sheet.team_id).await?;
    Ok(sheet)
}
