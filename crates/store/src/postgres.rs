//! PostgreSQL store backend
//!
//! Runtime-checked queries over the schema in `migrations/`. Each
//! [`PgTx`] wraps one `sqlx` transaction; dropping it without `commit`
//! rolls back.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use touchline_common::{Config, RepositoryError, StoreProvider};
use touchline_domain::{
    Competition, CompetitionRequest, CompetitionTeam, Match, MatchParticipant, MatchSheet, Player,
    PlayerParticipation, RequestFilter, Team, User,
};
use uuid::Uuid;

use crate::repository::{LeagueStore, LeagueTx, StoreResult};

const USER_COLUMNS: &str = "id, email, first_name, last_name, role, team_id, created_at, updated_at";

const TEAM_COLUMNS: &str = "id, name, description, category, coach_id, created_at, updated_at";

const PLAYER_COLUMNS: &str = "id, team_id, first_name, last_name, license_number, \
     date_of_birth, position, created_at, updated_at";

const COMPETITION_COLUMNS: &str = "id, name, description, competition_type, status, \
     start_date, end_date, registration_deadline, max_teams, location, category, \
     organizer_id, created_at, updated_at";

const COMPETITION_TEAM_COLUMNS: &str =
    "id, competition_id, team_id, status, joined_at, updated_at";

const REQUEST_COLUMNS: &str = "id, competition_id, team_id, coach_id, request_type, \
     request_status, reason, response_message, created_at, updated_at, processed_at";

const MATCH_COLUMNS: &str = "id, competition_id, title, description, location, match_date, \
     round, status, home_score, away_score, created_at, updated_at";

const PARTICIPANT_COLUMNS: &str = "id, match_id, team_id, role";

const SHEET_COLUMNS: &str = "id, match_id, team_id, status, submission_deadline, \
     validation_date, strategy, organizer_comments, created_at, updated_at";

const PARTICIPATION_COLUMNS: &str = "id, match_sheet_id, player_id, shirt_number, status, \
     position, goals_scored, yellow_cards, red_cards, minutes_played, \
     substitution_in_time, substitution_out_time, created_at, updated_at";

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using `DATABASE_URL` and the configured pool size
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let url = config.database_url.as_deref().ok_or_else(|| {
            RepositoryError::InvalidData("DATABASE_URL is required for postgres".to_string())
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl LeagueStore for PgStore {
    async fn begin(&self) -> StoreResult<Box<dyn LeagueTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTx { tx }))
    }

    #[mutants::skip] // Needs a live database to observe
    fn provider(&self) -> StoreProvider {
        StoreProvider::Postgres
    }
}

/// Unit of work over one PostgreSQL transaction
pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

/// Map unique violations to `AlreadyExists`
fn insert_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::AlreadyExists,
        _ => RepositoryError::Connection(err),
    }
}

fn expect_one(rows_affected: u64) -> StoreResult<()> {
    if rows_affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

#[async_trait]
impl LeagueTx for PgTx {
    async fn insert_user(&mut self, user: &User) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (id, email, first_name, last_name, role, team_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role)
        .bind(user.team_id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn find_user(&mut self, id: Uuid) -> StoreResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_team(&mut self, team: &Team) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO teams (id, name, description, category, coach_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.description)
        .bind(&team.category)
        .bind(team.coach_id)
        .bind(team.created_at)
        .bind(team.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn find_team(&mut self, id: Uuid) -> StoreResult<Option<Team>> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1");
        let row = sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn list_teams_by_coach(&mut self, coach_id: Uuid) -> StoreResult<Vec<Team>> {
        let query =
            format!("SELECT {TEAM_COLUMNS} FROM teams WHERE coach_id = $1 ORDER BY created_at ASC");
        let rows = sqlx::query_as::<_, Team>(&query)
            .bind(coach_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_player(&mut self, player: &Player) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO players (id, team_id, first_name, last_name, license_number, \
             date_of_birth, position, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(player.id)
        .bind(player.team_id)
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(&player.license_number)
        .bind(player.date_of_birth)
        .bind(player.position)
        .bind(player.created_at)
        .bind(player.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn find_player(&mut self, id: Uuid) -> StoreResult<Option<Player>> {
        let query = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1");
        let row = sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn list_players_by_team(&mut self, team_id: Uuid) -> StoreResult<Vec<Player>> {
        let query = format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = $1 ORDER BY last_name, first_name"
        );
        let rows = sqlx::query_as::<_, Player>(&query)
            .bind(team_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_competition(&mut self, competition: &Competition) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO competitions (id, name, description, competition_type, status, \
             start_date, end_date, registration_deadline, max_teams, location, category, \
             organizer_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(competition.id)
        .bind(&competition.name)
        .bind(&competition.description)
        .bind(competition.competition_type)
        .bind(competition.status)
        .bind(competition.start_date)
        .bind(competition.end_date)
        .bind(competition.registration_deadline)
        .bind(competition.max_teams)
        .bind(&competition.location)
        .bind(&competition.category)
        .bind(competition.organizer_id)
        .bind(competition.created_at)
        .bind(competition.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn find_competition(&mut self, id: Uuid) -> StoreResult<Option<Competition>> {
        let query = format!("SELECT {COMPETITION_COLUMNS} FROM competitions WHERE id = $1");
        let row = sqlx::query_as::<_, Competition>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn lock_competition(&mut self, id: Uuid) -> StoreResult<Option<Competition>> {
        let query =
            format!("SELECT {COMPETITION_COLUMNS} FROM competitions WHERE id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, Competition>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_competition(&mut self, competition: &Competition) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE competitions SET \
                name = $2, description = $3, competition_type = $4, status = $5, \
                start_date = $6, end_date = $7, registration_deadline = $8, max_teams = $9, \
                location = $10, category = $11, updated_at = $12 \
             WHERE id = $1",
        )
        .bind(competition.id)
        .bind(&competition.name)
        .bind(&competition.description)
        .bind(competition.competition_type)
        .bind(competition.status)
        .bind(competition.start_date)
        .bind(competition.end_date)
        .bind(competition.registration_deadline)
        .bind(competition.max_teams)
        .bind(&competition.location)
        .bind(&competition.category)
        .bind(competition.updated_at)
        .execute(&mut *self.tx)
        .await?;
        expect_one(result.rows_affected())
    }

    async fn delete_competition(&mut self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        expect_one(result.rows_affected())
    }

    async fn list_competitions_by_organizer(
        &mut self,
        organizer_id: Uuid,
    ) -> StoreResult<Vec<Competition>> {
        let query = format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions WHERE organizer_id = $1 \
             ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, Competition>(&query)
            .bind(organizer_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_competition_team(&mut self, membership: &CompetitionTeam) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO competition_teams (id, competition_id, team_id, status, joined_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(membership.id)
        .bind(membership.competition_id)
        .bind(membership.team_id)
        .bind(membership.status)
        .bind(membership.joined_at)
        .bind(membership.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn find_competition_team(
        &mut self,
        competition_id: Uuid,
        team_id: Uuid,
    ) -> StoreResult<Option<CompetitionTeam>> {
        let query = format!(
            "SELECT {COMPETITION_TEAM_COLUMNS} FROM competition_teams \
             WHERE competition_id = $1 AND team_id = $2"
        );
        let row = sqlx::query_as::<_, CompetitionTeam>(&query)
            .bind(competition_id)
            .bind(team_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_competition_team(&mut self, membership: &CompetitionTeam) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE competition_teams SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(membership.id)
        .bind(membership.status)
        .bind(membership.updated_at)
        .execute(&mut *self.tx)
        .await?;
        expect_one(result.rows_affected())
    }

    async fn delete_competition_team(
        &mut self,
        competition_id: Uuid,
        team_id: Uuid,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            "DELETE FROM competition_teams WHERE competition_id = $1 AND team_id = $2",
        )
        .bind(competition_id)
        .bind(team_id)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_competition_teams(&mut self, competition_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM competition_teams WHERE competition_id = $1")
            .bind(competition_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_competition_teams(
        &mut self,
        competition_id: Uuid,
    ) -> StoreResult<Vec<CompetitionTeam>> {
        let query = format!(
            "SELECT {COMPETITION_TEAM_COLUMNS} FROM competition_teams \
             WHERE competition_id = $1 ORDER BY joined_at ASC"
        );
        let rows = sqlx::query_as::<_, CompetitionTeam>(&query)
            .bind(competition_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn list_memberships_for_team(
        &mut self,
        team_id: Uuid,
    ) -> StoreResult<Vec<CompetitionTeam>> {
        let query = format!(
            "SELECT {COMPETITION_TEAM_COLUMNS} FROM competition_teams \
             WHERE team_id = $1 ORDER BY joined_at ASC"
        );
        let rows = sqlx::query_as::<_, CompetitionTeam>(&query)
            .bind(team_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn count_active_competition_teams(&mut self, competition_id: Uuid) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM competition_teams \
             WHERE competition_id = $1 AND status = 'ACTIVE'",
        )
        .bind(competition_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(count)
    }

    async fn insert_request(&mut self, request: &CompetitionRequest) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO competition_requests (id, competition_id, team_id, coach_id, \
             request_type, request_status, reason, response_message, created_at, updated_at, \
             processed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(request.id)
        .bind(request.competition_id)
        .bind(request.team_id)
        .bind(request.coach_id)
        .bind(request.request_type)
        .bind(request.request_status)
        .bind(&request.reason)
        .bind(&request.response_message)
        .bind(request.created_at)
        .bind(request.updated_at)
        .bind(request.processed_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn find_request(&mut self, id: Uuid) -> StoreResult<Option<CompetitionRequest>> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM competition_requests WHERE id = $1");
        let row = sqlx::query_as::<_, CompetitionRequest>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_request(&mut self, request: &CompetitionRequest) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE competition_requests SET \
                request_status = $2, response_message = $3, updated_at = $4, processed_at = $5 \
             WHERE id = $1",
        )
        .bind(request.id)
        .bind(request.request_status)
        .bind(&request.response_message)
        .bind(request.updated_at)
        .bind(request.processed_at)
        .execute(&mut *self.tx)
        .await?;
        expect_one(result.rows_affected())
    }

    async fn list_requests(
        &mut self,
        filter: &RequestFilter,
    ) -> StoreResult<Vec<CompetitionRequest>> {
        // NULL parameters disable their predicate
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM competition_requests \
             WHERE ($1::uuid IS NULL OR competition_id = $1) \
               AND ($2::uuid IS NULL OR team_id = $2) \
               AND ($3::uuid IS NULL OR coach_id = $3) \
               AND ($4::request_type IS NULL OR request_type = $4) \
               AND ($5::request_status IS NULL OR request_status = $5) \
             ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, CompetitionRequest>(&query)
            .bind(filter.competition_id)
            .bind(filter.team_id)
            .bind(filter.coach_id)
            .bind(filter.request_type)
            .bind(filter.request_status)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn delete_requests_for_competition(&mut self, competition_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM competition_requests WHERE competition_id = $1")
            .bind(competition_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_match(&mut self, fixture: &Match) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO matches (id, competition_id, title, description, location, match_date, \
             round, status, home_score, away_score, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(fixture.id)
        .bind(fixture.competition_id)
        .bind(&fixture.title)
        .bind(&fixture.description)
        .bind(&fixture.location)
        .bind(fixture.match_date)
        .bind(fixture.round)
        .bind(fixture.status)
        .bind(fixture.home_score)
        .bind(fixture.away_score)
        .bind(fixture.created_at)
        .bind(fixture.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn find_match(&mut self, id: Uuid) -> StoreResult<Option<Match>> {
        let query = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1");
        let row = sqlx::query_as::<_, Match>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_match(&mut self, fixture: &Match) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE matches SET \
                title = $2, description = $3, location = $4, match_date = $5, round = $6, \
                status = $7, home_score = $8, away_score = $9, updated_at = $10 \
             WHERE id = $1",
        )
        .bind(fixture.id)
        .bind(&fixture.title)
        .bind(&fixture.description)
        .bind(&fixture.location)
        .bind(fixture.match_date)
        .bind(fixture.round)
        .bind(fixture.status)
        .bind(fixture.home_score)
        .bind(fixture.away_score)
        .bind(fixture.updated_at)
        .execute(&mut *self.tx)
        .await?;
        expect_one(result.rows_affected())
    }

    async fn delete_match(&mut self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        expect_one(result.rows_affected())
    }

    async fn list_matches_by_competition(
        &mut self,
        competition_id: Uuid,
    ) -> StoreResult<Vec<Match>> {
        let query = format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE competition_id = $1 \
             ORDER BY round ASC, match_date ASC"
        );
        let rows = sqlx::query_as::<_, Match>(&query)
            .bind(competition_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_participant(&mut self, participant: &MatchParticipant) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO match_participants (id, match_id, team_id, role) VALUES ($1, $2, $3, $4)",
        )
        .bind(participant.id)
        .bind(participant.match_id)
        .bind(participant.team_id)
        .bind(participant.role)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn list_participants(&mut self, match_id: Uuid) -> StoreResult<Vec<MatchParticipant>> {
        let query = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM match_participants WHERE match_id = $1 ORDER BY role"
        );
        let rows = sqlx::query_as::<_, MatchParticipant>(&query)
            .bind(match_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn delete_participants(&mut self, match_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM match_participants WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_sheet(&mut self, sheet: &MatchSheet) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO match_sheets (id, match_id, team_id, status, submission_deadline, \
             validation_date, strategy, organizer_comments, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(sheet.id)
        .bind(sheet.match_id)
        .bind(sheet.team_id)
        .bind(sheet.status)
        .bind(sheet.submission_deadline)
        .bind(sheet.validation_date)
        .bind(&sheet.strategy)
        .bind(&sheet.organizer_comments)
        .bind(sheet.created_at)
        .bind(sheet.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn find_sheet(&mut self, id: Uuid) -> StoreResult<Option<MatchSheet>> {
        let query = format!("SELECT {SHEET_COLUMNS} FROM match_sheets WHERE id = $1");
        let row = sqlx::query_as::<_, MatchSheet>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_sheet(&mut self, sheet: &MatchSheet) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE match_sheets SET \
                status = $2, submission_deadline = $3, validation_date = $4, strategy = $5, \
                organizer_comments = $6, updated_at = $7 \
             WHERE id = $1",
        )
        .bind(sheet.id)
        .bind(sheet.status)
        .bind(sheet.submission_deadline)
        .bind(sheet.validation_date)
        .bind(&sheet.strategy)
        .bind(&sheet.organizer_comments)
        .bind(sheet.updated_at)
        .execute(&mut *self.tx)
        .await?;
        expect_one(result.rows_affected())
    }

    async fn delete_sheet(&mut self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM match_sheets WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        expect_one(result.rows_affected())
    }

    async fn list_sheets_by_match(&mut self, match_id: Uuid) -> StoreResult<Vec<MatchSheet>> {
        let query = format!(
            "SELECT {SHEET_COLUMNS} FROM match_sheets WHERE match_id = $1 ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, MatchSheet>(&query)
            .bind(match_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn list_sheets_by_team(&mut self, team_id: Uuid) -> StoreResult<Vec<MatchSheet>> {
        let query = format!(
            "SELECT {SHEET_COLUMNS} FROM match_sheets WHERE team_id = $1 ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, MatchSheet>(&query)
            .bind(team_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_participation(
        &mut self,
        participation: &PlayerParticipation,
    ) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO player_participations (id, match_sheet_id, player_id, shirt_number, \
             status, position, goals_scored, yellow_cards, red_cards, minutes_played, \
             substitution_in_time, substitution_out_time, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(participation.id)
        .bind(participation.match_sheet_id)
        .bind(participation.player_id)
        .bind(participation.shirt_number)
        .bind(participation.status)
        .bind(participation.position)
        .bind(participation.goals_scored)
        .bind(participation.yellow_cards)
        .bind(participation.red_cards)
        .bind(participation.minutes_played)
        .bind(participation.substitution_in_time)
        .bind(participation.substitution_out_time)
        .bind(participation.created_at)
        .bind(participation.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn list_participations(
        &mut self,
        match_sheet_id: Uuid,
    ) -> StoreResult<Vec<PlayerParticipation>> {
        let query = format!(
            "SELECT {PARTICIPATION_COLUMNS} FROM player_participations \
             WHERE match_sheet_id = $1 ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, PlayerParticipation>(&query)
            .bind(match_sheet_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn delete_participations(&mut self, match_sheet_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM player_participations WHERE match_sheet_id = $1")
            .bind(match_sheet_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let PgTx { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
