//! Team directory
//!
//! Resolves teams, their coaches and squads. Team creation is the only
//! place the 11-25 squad size rule applies.

use std::sync::Arc;

use serde::Serialize;
use touchline_common::{Error, Result};
use touchline_domain::{Player, Team, TeamDraft};
use touchline_store::access::require_coach;
use touchline_store::LeagueStore;
use uuid::Uuid;

/// A team with its squad
#[derive(Debug, Clone, Serialize)]
pub struct TeamRoster {
    pub team: Team,
    pub players: Vec<Player>,
}

#[derive(Clone)]
pub struct TeamDirectory {
    store: Arc<dyn LeagueStore>,
}

impl TeamDirectory {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self { store }
    }

    /// Create a team coached by `coach_id` with its initial squad
    ///
    /// Licence numbers are unique across all teams; a reused one is a conflict.
    pub async fn create_team(&self, coach_id: Uuid, draft: TeamDraft) -> Result<TeamRoster> {
        let (team, players) = Team::create(coach_id, &draft)?;

        let mut tx = self.store.begin().await?;
        require_coach(tx.as_mut(), coach_id).await?;

        tx.insert_team(&team).await?;
        for player in &players {
            tx.insert_player(player).await.map_err(|e| {
                tracing::debug!(
                    license_number = %player.license_number,
                    error = %e,
                    "Player insert rejected"
                );
                Error::from(e)
            })?;
        }
        tx.commit().await?;

        tracing::info!(
            team_id = %team.id,
            coach_id = %coach_id,
            players = players.len(),
            "Team created"
        );

        Ok(TeamRoster { team, players })
    }

    pub async fn get_team(&self, team_id: Uuid) -> Result<Team> {
        let mut tx = self.store.begin().await?;
        tx.find_team(team_id)
            .await?
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))
    }

    pub async fn list_teams_for_coach(&self, coach_id: Uuid) -> Result<Vec<Team>> {
        let mut tx = self.store.begin().await?;
        let coach = require_coach(tx.as_mut(), coach_id).await?;

        Ok(tx.list_teams_by_coach(coach.user_id).await?)
    }

    /// Squad of a team
    pub async fn team_players(&self, team_id: Uuid) -> Result<Vec<Player>> {
        let mut tx = self.store.begin().await?;
        if tx.find_team(team_id).await?.is_none() {
            return Err(Error::NotFound("Team not found".to_string()));
        }

        Ok(tx.list_players_by_team(team_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchline_common::ErrorKind;
    use touchline_domain::MIN_SQUAD_SIZE;
    use touchline_store::fixtures::team_draft;
    use touchline_store::{LeagueFixture, MemoryStore};

    async fn setup() -> (TeamDirectory, LeagueFixture) {
        let store: Arc<dyn LeagueStore> = Arc::new(MemoryStore::new());
        let fixture = LeagueFixture::seed(store.as_ref(), 1).await.unwrap();
        (TeamDirectory::new(store), fixture)
    }

    #[tokio::test]
    async fn test_create_team_persists_squad() {
        let (directory, fixture) = setup().await;
        let coach = fixture.coaches[0].id;

        let roster = directory.create_team(coach, team_draft(7)).await.unwrap();
        assert_eq!(roster.players.len(), MIN_SQUAD_SIZE);

        let teams = directory.list_teams_for_coach(coach).await.unwrap();
        assert_eq!(teams.len(), 2);

        let players = directory.team_players(roster.team.id).await.unwrap();
        assert_eq!(players.len(), MIN_SQUAD_SIZE);
        assert_eq!(directory.get_team(roster.team.id).await.unwrap(), roster.team);
    }

    #[tokio::test]
    async fn test_create_team_requires_coach() {
        let (directory, fixture) = setup().await;

        let err = directory
            .create_team(fixture.organizer.id, team_draft(7))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_squad_size_enforced() {
        let (directory, fixture) = setup().await;
        let mut draft = team_draft(7);
        draft.players.pop();

        let err = directory
            .create_team(fixture.coaches[0].id, draft)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_reused_license_number_conflicts() {
        let (directory, fixture) = setup().await;

        // Same index as the seeded team, so every licence number collides
        let err = directory
            .create_team(fixture.coaches[0].id, team_draft(0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Nothing from the failed attempt was kept
        let teams = directory
            .list_teams_for_coach(fixture.coaches[0].id)
            .await
            .unwrap();
        assert_eq!(teams.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_team() {
        let (directory, _) = setup().await;

        let err = directory.team_players(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
