//! In-memory store backend
//!
//! Each transaction takes the store-wide lock and works on a private copy of
//! the tables. `commit` swaps the copy in; dropping the transaction discards
//! it. Writers are therefore fully serialized, which also covers the
//! per-competition locking that [`LeagueTx::lock_competition`] promises.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use touchline_common::{RepositoryError, StoreProvider};
use touchline_domain::{
    Competition, CompetitionRequest, CompetitionTeam, Match, MatchParticipant, MatchSheet, Player,
    PlayerParticipation, RequestFilter, Team, User,
};
use uuid::Uuid;

use crate::repository::{LeagueStore, LeagueTx, StoreResult};

#[derive(Debug, Default, Clone)]
struct Tables {
    users: Vec<User>,
    teams: Vec<Team>,
    players: Vec<Player>,
    competitions: Vec<Competition>,
    competition_teams: Vec<CompetitionTeam>,
    requests: Vec<CompetitionRequest>,
    matches: Vec<Match>,
    participants: Vec<MatchParticipant>,
    sheets: Vec<MatchSheet>,
    participations: Vec<PlayerParticipation>,
}

/// Process-local store used by tests and the default configuration
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeagueStore for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn LeagueTx>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTx { guard, working }))
    }

    fn provider(&self) -> StoreProvider {
        StoreProvider::Memory
    }
}

/// Unit of work over a private copy of the tables
pub struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

fn replace<T, F>(rows: &mut [T], row: &T, same: F) -> StoreResult<()>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    match rows.iter_mut().find(|r| same(r)) {
        Some(slot) => {
            *slot = row.clone();
            Ok(())
        }
        None => Err(RepositoryError::NotFound),
    }
}

fn remove_where<T, F>(rows: &mut Vec<T>, matches: F) -> u64
where
    F: Fn(&T) -> bool,
{
    let before = rows.len();
    rows.retain(|r| !matches(r));
    (before - rows.len()) as u64
}

fn remove_one<T, F>(rows: &mut Vec<T>, matches: F) -> StoreResult<()>
where
    F: Fn(&T) -> bool,
{
    match remove_where(rows, matches) {
        0 => Err(RepositoryError::NotFound),
        _ => Ok(()),
    }
}

#[async_trait]
impl LeagueTx for MemoryTx {
    async fn insert_user(&mut self, user: &User) -> StoreResult<()> {
        if self
            .working
            .users
            .iter()
            .any(|u| u.id == user.id || u.email == user.email)
        {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.users.push(user.clone());
        Ok(())
    }

    async fn find_user(&mut self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.working.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_team(&mut self, team: &Team) -> StoreResult<()> {
        if self.working.teams.iter().any(|t| t.id == team.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.teams.push(team.clone());
        Ok(())
    }

    async fn find_team(&mut self, id: Uuid) -> StoreResult<Option<Team>> {
        Ok(self.working.teams.iter().find(|t| t.id == id).cloned())
    }

    async fn list_teams_by_coach(&mut self, coach_id: Uuid) -> StoreResult<Vec<Team>> {
        Ok(self
            .working
            .teams
            .iter()
            .filter(|t| t.coach_id == coach_id)
            .cloned()
            .collect())
    }

    async fn insert_player(&mut self, player: &Player) -> StoreResult<()> {
        if self
            .working
            .players
            .iter()
            .any(|p| p.id == player.id || p.license_number == player.license_number)
        {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.players.push(player.clone());
        Ok(())
    }

    async fn find_player(&mut self, id: Uuid) -> StoreResult<Option<Player>> {
        Ok(self.working.players.iter().find(|p| p.id == id).cloned())
    }

    async fn list_players_by_team(&mut self, team_id: Uuid) -> StoreResult<Vec<Player>> {
        Ok(self
            .working
            .players
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn insert_competition(&mut self, competition: &Competition) -> StoreResult<()> {
        if self.working.competitions.iter().any(|c| c.id == competition.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.competitions.push(competition.clone());
        Ok(())
    }

    async fn find_competition(&mut self, id: Uuid) -> StoreResult<Option<Competition>> {
        Ok(self.working.competitions.iter().find(|c| c.id == id).cloned())
    }

    async fn lock_competition(&mut self, id: Uuid) -> StoreResult<Option<Competition>> {
        // The store-wide guard already excludes every other transaction
        self.find_competition(id).await
    }

    async fn update_competition(&mut self, competition: &Competition) -> StoreResult<()> {
        replace(&mut self.working.competitions, competition, |c| {
            c.id == competition.id
        })
    }

    async fn delete_competition(&mut self, id: Uuid) -> StoreResult<()> {
        remove_one(&mut self.working.competitions, |c| c.id == id)
    }

    async fn list_competitions_by_organizer(
        &mut self,
        organizer_id: Uuid,
    ) -> StoreResult<Vec<Competition>> {
        Ok(self
            .working
            .competitions
            .iter()
            .filter(|c| c.organizer_id == organizer_id)
            .cloned()
            .collect())
    }

    async fn insert_competition_team(&mut self, membership: &CompetitionTeam) -> StoreResult<()> {
        if self.working.competition_teams.iter().any(|m| {
            m.id == membership.id
                || (m.competition_id == membership.competition_id
                    && m.team_id == membership.team_id)
        }) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.competition_teams.push(membership.clone());
        Ok(())
    }

    async fn find_competition_team(
        &mut self,
        competition_id: Uuid,
        team_id: Uuid,
    ) -> StoreResult<Option<CompetitionTeam>> {
        Ok(self
            .working
            .competition_teams
            .iter()
            .find(|m| m.competition_id == competition_id && m.team_id == team_id)
            .cloned())
    }

    async fn update_competition_team(&mut self, membership: &CompetitionTeam) -> StoreResult<()> {
        replace(&mut self.working.competition_teams, membership, |m| {
            m.id == membership.id
        })
    }

    async fn delete_competition_team(
        &mut self,
        competition_id: Uuid,
        team_id: Uuid,
    ) -> StoreResult<u64> {
        Ok(remove_where(&mut self.working.competition_teams, |m| {
            m.competition_id == competition_id && m.team_id == team_id
        }))
    }

    async fn delete_competition_teams(&mut self, competition_id: Uuid) -> StoreResult<u64> {
        Ok(remove_where(&mut self.working.competition_teams, |m| {
            m.competition_id == competition_id
        }))
    }

    async fn list_competition_teams(
        &mut self,
        competition_id: Uuid,
    ) -> StoreResult<Vec<CompetitionTeam>> {
        Ok(self
            .working
            .competition_teams
            .iter()
            .filter(|m| m.competition_id == competition_id)
            .cloned()
            .collect())
    }

    async fn list_memberships_for_team(
        &mut self,
        team_id: Uuid,
    ) -> StoreResult<Vec<CompetitionTeam>> {
        Ok(self
            .working
            .competition_teams
            .iter()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn count_active_competition_teams(&mut self, competition_id: Uuid) -> StoreResult<i64> {
        Ok(self
            .working
            .competition_teams
            .iter()
            .filter(|m| m.competition_id == competition_id && m.is_active())
            .count() as i64)
    }

    async fn insert_request(&mut self, request: &CompetitionRequest) -> StoreResult<()> {
        let duplicate_pending = request.is_pending()
            && self.working.requests.iter().any(|r| {
                r.is_pending()
                    && r.team_id == request.team_id
                    && r.competition_id == request.competition_id
                    && r.request_type == request.request_type
            });
        if duplicate_pending || self.working.requests.iter().any(|r| r.id == request.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.requests.push(request.clone());
        Ok(())
    }

    async fn find_request(&mut self, id: Uuid) -> StoreResult<Option<CompetitionRequest>> {
        Ok(self.working.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn update_request(&mut self, request: &CompetitionRequest) -> StoreResult<()> {
        replace(&mut self.working.requests, request, |r| r.id == request.id)
    }

    async fn list_requests(
        &mut self,
        filter: &RequestFilter,
    ) -> StoreResult<Vec<CompetitionRequest>> {
        Ok(self
            .working
            .requests
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn delete_requests_for_competition(&mut self, competition_id: Uuid) -> StoreResult<u64> {
        Ok(remove_where(&mut self.working.requests, |r| {
            r.competition_id == competition_id
        }))
    }

    async fn insert_match(&mut self, fixture: &Match) -> StoreResult<()> {
        if self.working.matches.iter().any(|m| m.id == fixture.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.matches.push(fixture.clone());
        Ok(())
    }

    async fn find_match(&mut self, id: Uuid) -> StoreResult<Option<Match>> {
        Ok(self.working.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn update_match(&mut self, fixture: &Match) -> StoreResult<()> {
        replace(&mut self.working.matches, fixture, |m| m.id == fixture.id)
    }

    async fn delete_match(&mut self, id: Uuid) -> StoreResult<()> {
        remove_one(&mut self.working.matches, |m| m.id == id)
    }

    async fn list_matches_by_competition(
        &mut self,
        competition_id: Uuid,
    ) -> StoreResult<Vec<Match>> {
        let mut matches: Vec<Match> = self
            .working
            .matches
            .iter()
            .filter(|m| m.competition_id == competition_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round, m.match_date));
        Ok(matches)
    }

    async fn insert_participant(&mut self, participant: &MatchParticipant) -> StoreResult<()> {
        if self.working.participants.iter().any(|p| {
            p.id == participant.id
                || (p.match_id == participant.match_id && p.team_id == participant.team_id)
        }) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.participants.push(participant.clone());
        Ok(())
    }

    async fn list_participants(&mut self, match_id: Uuid) -> StoreResult<Vec<MatchParticipant>> {
        Ok(self
            .working
            .participants
            .iter()
            .filter(|p| p.match_id == match_id)
            .cloned()
            .collect())
    }

    async fn delete_participants(&mut self, match_id: Uuid) -> StoreResult<u64> {
        Ok(remove_where(&mut self.working.participants, |p| {
            p.match_id == match_id
        }))
    }

    async fn insert_sheet(&mut self, sheet: &MatchSheet) -> StoreResult<()> {
        if self.working.sheets.iter().any(|s| {
            s.id == sheet.id || (s.match_id == sheet.match_id && s.team_id == sheet.team_id)
        }) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.sheets.push(sheet.clone());
        Ok(())
    }

    async fn find_sheet(&mut self, id: Uuid) -> StoreResult<Option<MatchSheet>> {
        Ok(self.working.sheets.iter().find(|s| s.id == id).cloned())
    }

    async fn update_sheet(&mut self, sheet: &MatchSheet) -> StoreResult<()> {
        replace(&mut self.working.sheets, sheet, |s| s.id == sheet.id)
    }

    async fn delete_sheet(&mut self, id: Uuid) -> StoreResult<()> {
        remove_one(&mut self.working.sheets, |s| s.id == id)
    }

    async fn list_sheets_by_match(&mut self, match_id: Uuid) -> StoreResult<Vec<MatchSheet>> {
        Ok(self
            .working
            .sheets
            .iter()
            .filter(|s| s.match_id == match_id)
            .cloned()
            .collect())
    }

    async fn list_sheets_by_team(&mut self, team_id: Uuid) -> StoreResult<Vec<MatchSheet>> {
        Ok(self
            .working
            .sheets
            .iter()
            .filter(|s| s.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn insert_participation(
        &mut self,
        participation: &PlayerParticipation,
    ) -> StoreResult<()> {
        if self
            .working
            .participations
            .iter()
            .any(|p| p.id == participation.id)
        {
            return Err(RepositoryError::AlreadyExists);
        }
        self.working.participations.push(participation.clone());
        Ok(())
    }

    async fn list_participations(
        &mut self,
        match_sheet_id: Uuid,
    ) -> StoreResult<Vec<PlayerParticipation>> {
        Ok(self
            .working
            .participations
            .iter()
            .filter(|p| p.match_sheet_id == match_sheet_id)
            .cloned()
            .collect())
    }

    async fn delete_participations(&mut self, match_sheet_id: Uuid) -> StoreResult<u64> {
        Ok(remove_where(&mut self.working.participations, |p| {
            p.match_sheet_id == match_sheet_id
        }))
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
