//! Entity store traits
//!
//! A [`LeagueStore`] hands out [`LeagueTx`] units of work. Every workflow
//! operation opens one transaction, reads and validates, mutates, then
//! commits once. Dropping a transaction without `commit` discards its
//! writes.

use async_trait::async_trait;
use touchline_common::{RepositoryError, StoreProvider};
use touchline_domain::{
    Competition, CompetitionRequest, CompetitionTeam, Match, MatchParticipant, MatchSheet, Player,
    PlayerParticipation, RequestFilter, Team, User,
};
use uuid::Uuid;

pub type StoreResult<T> = std::result::Result<T, RepositoryError>;

/// Source of transactions over the league entities
#[async_trait]
pub trait LeagueStore: Send + Sync {
    /// Begin a new unit of work
    async fn begin(&self) -> StoreResult<Box<dyn LeagueTx>>;

    /// Which backend this store runs on
    fn provider(&self) -> StoreProvider;
}

/// One unit of work over the league entities
///
/// `insert_*` fails with `AlreadyExists` when a uniqueness rule is broken:
/// one membership per (competition, team), one PENDING request per
/// (team, competition, request type), one sheet per (match, team).
#[async_trait]
pub trait LeagueTx: Send {
    // Users

    async fn insert_user(&mut self, user: &User) -> StoreResult<()>;
    async fn find_user(&mut self, id: Uuid) -> StoreResult<Option<User>>;

    // Teams and players

    async fn insert_team(&mut self, team: &Team) -> StoreResult<()>;
    async fn find_team(&mut self, id: Uuid) -> StoreResult<Option<Team>>;
    async fn list_teams_by_coach(&mut self, coach_id: Uuid) -> StoreResult<Vec<Team>>;

    async fn insert_player(&mut self, player: &Player) -> StoreResult<()>;
    async fn find_player(&mut self, id: Uuid) -> StoreResult<Option<Player>>;
    async fn list_players_by_team(&mut self, team_id: Uuid) -> StoreResult<Vec<Player>>;

    // Competitions

    async fn insert_competition(&mut self, competition: &Competition) -> StoreResult<()>;
    async fn find_competition(&mut self, id: Uuid) -> StoreResult<Option<Competition>>;

    /// Find a competition and hold its row lock until the transaction ends
    ///
    /// Serializes capacity checks and request resolution per competition.
    async fn lock_competition(&mut self, id: Uuid) -> StoreResult<Option<Competition>>;

    async fn update_competition(&mut self, competition: &Competition) -> StoreResult<()>;
    async fn delete_competition(&mut self, id: Uuid) -> StoreResult<()>;
    async fn list_competitions_by_organizer(
        &mut self,
        organizer_id: Uuid,
    ) -> StoreResult<Vec<Competition>>;

    // Competition membership

    async fn insert_competition_team(&mut self, membership: &CompetitionTeam) -> StoreResult<()>;
    async fn find_competition_team(
        &mut self,
        competition_id: Uuid,
        team_id: Uuid,
    ) -> StoreResult<Option<CompetitionTeam>>;
    async fn update_competition_team(&mut self, membership: &CompetitionTeam) -> StoreResult<()>;
    async fn delete_competition_team(
        &mut self,
        competition_id: Uuid,
        team_id: Uuid,
    ) -> StoreResult<u64>;
    async fn delete_competition_teams(&mut self, competition_id: Uuid) -> StoreResult<u64>;
    async fn list_competition_teams(
        &mut self,
        competition_id: Uuid,
    ) -> StoreResult<Vec<CompetitionTeam>>;
    async fn list_memberships_for_team(&mut self, team_id: Uuid)
        -> StoreResult<Vec<CompetitionTeam>>;
    async fn count_active_competition_teams(&mut self, competition_id: Uuid) -> StoreResult<i64>;

    // Requests

    async fn insert_request(&mut self, request: &CompetitionRequest) -> StoreResult<()>;
    async fn find_request(&mut self, id: Uuid) -> StoreResult<Option<CompetitionRequest>>;
    async fn update_request(&mut self, request: &CompetitionRequest) -> StoreResult<()>;
    async fn list_requests(&mut self, filter: &RequestFilter)
        -> StoreResult<Vec<CompetitionRequest>>;
    async fn delete_requests_for_competition(&mut self, competition_id: Uuid) -> StoreResult<u64>;

    // Matches

    async fn insert_match(&mut self, fixture: &Match) -> StoreResult<()>;
    async fn find_match(&mut self, id: Uuid) -> StoreResult<Option<Match>>;
    async fn update_match(&mut self, fixture: &Match) -> StoreResult<()>;
    async fn delete_match(&mut self, id: Uuid) -> StoreResult<()>;
    async fn list_matches_by_competition(&mut self, competition_id: Uuid)
        -> StoreResult<Vec<Match>>;

    async fn insert_participant(&mut self, participant: &MatchParticipant) -> StoreResult<()>;
    async fn list_participants(&mut self, match_id: Uuid) -> StoreResult<Vec<MatchParticipant>>;
    async fn delete_participants(&mut self, match_id: Uuid) -> StoreResult<u64>;

    // Match sheets

    async fn insert_sheet(&mut self, sheet: &MatchSheet) -> StoreResult<()>;
    async fn find_sheet(&mut self, id: Uuid) -> StoreResult<Option<MatchSheet>>;
    async fn update_sheet(&mut self, sheet: &MatchSheet) -> StoreResult<()>;
    async fn delete_sheet(&mut self, id: Uuid) -> StoreResult<()>;
    async fn list_sheets_by_match(&mut self, match_id: Uuid) -> StoreResult<Vec<MatchSheet>>;
    async fn list_sheets_by_team(&mut self, team_id: Uuid) -> StoreResult<Vec<MatchSheet>>;

    async fn insert_participation(&mut self, participation: &PlayerParticipation)
        -> StoreResult<()>;
    async fn list_participations(
        &mut self,
        match_sheet_id: Uuid,
    ) -> StoreResult<Vec<PlayerParticipation>>;
    async fn delete_participations(&mut self, match_sheet_id: Uuid) -> StoreResult<u64>;

    /// Make every write of this unit of work visible
    async fn commit(self: Box<Self>) -> StoreResult<()>;
}
