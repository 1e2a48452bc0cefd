//! Common test utilities and fixtures for integration tests
//!
//! Every test gets a fresh league seeded with one organizer, an admin and a
//! handful of coached teams. The league lives in memory, or in PostgreSQL
//! when `TEST_DATABASE_URL` is set and the test asks for it.

use std::env;
use std::sync::Once;

use chrono::{TimeZone, Utc};
use touchline_app::LeagueServices;
use touchline_common::{Config, Result, StoreProvider};
use touchline_domain::{
    Competition, CompetitionDraft, CompetitionRequest, CompetitionStatus, MatchDraft,
    ParticipantSpec,
};
use touchline_store::LeagueFixture;
use uuid::Uuid;

pub const TEAM_COUNT: usize = 4;

static INIT: Once = Once::new();

/// PostgreSQL URL for store tests, if one is configured
pub fn test_database_url() -> Option<String> {
    INIT.call_once(|| {
        dotenvy::from_filename(".env.test").ok();
    });

    env::var("TEST_DATABASE_URL")
        .ok()
        .filter(|url| !url.is_empty())
}

/// Composed services plus the seeded directory
pub struct TestApp {
    pub services: LeagueServices,
    pub fixture: LeagueFixture,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_teams(TEAM_COUNT).await
    }

    pub async fn with_teams(team_count: usize) -> Self {
        let services = LeagueServices::from_config(&Config::in_memory())
            .await
            .unwrap();
        let fixture = LeagueFixture::seed(services.store().as_ref(), team_count)
            .await
            .unwrap();
        Self { services, fixture }
    }

    /// A league on PostgreSQL, or `None` when no test database is configured
    ///
    /// Seeds are tagged per call so tests can share one database.
    pub async fn postgres(team_count: usize) -> Option<Self> {
        let Some(database_url) = test_database_url() else {
            tracing::info!("TEST_DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        };

        let config = Config {
            store_provider: StoreProvider::Postgres,
            database_url: Some(database_url),
            database_max_connections: 10,
            run_migrations: true,
            ..Config::in_memory()
        };
        let services = LeagueServices::from_config(&config).await.unwrap();
        let tag = Uuid::new_v4().simple().to_string()[..8].to_string();
        let fixture = LeagueFixture::seed_tagged(services.store().as_ref(), team_count, &tag)
            .await
            .unwrap();
        Some(Self { services, fixture })
    }

    pub fn organizer_id(&self) -> Uuid {
        self.fixture.organizer.id
    }

    pub fn team_id(&self, index: usize) -> Uuid {
        self.fixture.teams[index].id
    }

    pub fn coach_id(&self, index: usize) -> Uuid {
        self.fixture.coach_of(index).id
    }

    pub async fn create_competition(&self, max_teams: Option<i32>) -> Competition {
        self.services
            .competitions
            .create(
                self.organizer_id(),
                CompetitionDraft {
                    name: "County Championship".to_string(),
                    max_teams,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
    }

    pub async fn move_competition(
        &self,
        competition_id: Uuid,
        status: CompetitionStatus,
    ) -> Result<Competition> {
        self.services
            .competitions
            .update_status(self.organizer_id(), competition_id, status, None)
            .await
    }

    pub async fn request_registration(
        &self,
        index: usize,
        competition_id: Uuid,
    ) -> Result<CompetitionRequest> {
        self.services
            .registration
            .request_registration(
                self.coach_id(index),
                self.team_id(index),
                competition_id,
                None,
            )
            .await
    }

    pub async fn resolve(&self, request_id: Uuid, approved: bool) -> Result<CompetitionRequest> {
        self.services
            .registration
            .resolve(self.organizer_id(), request_id, approved, None)
            .await
    }

    /// Register and approve teams `indexes` in `competition_id`
    pub async fn enrol(&self, competition_id: Uuid, indexes: &[usize]) {
        for &index in indexes {
            let request = self
                .request_registration(index, competition_id)
                .await
                .unwrap();
            self.resolve(request.id, true).await.unwrap();
        }
    }

    /// Schedule team `home` against team `away`
    pub async fn schedule(
        &self,
        competition_id: Uuid,
        home: usize,
        away: usize,
    ) -> touchline_matches::MatchDetails {
        self.services
            .matches
            .schedule(
                self.organizer_id(),
                competition_id,
                match_draft(1),
                vec![
                    ParticipantSpec::home(self.team_id(home)),
                    ParticipantSpec::away(self.team_id(away)),
                ],
            )
            .await
            .unwrap()
    }
}

pub fn match_draft(round: i32) -> MatchDraft {
    MatchDraft {
        title: format!("Round {} fixture", round),
        description: None,
        location: Some("Riverside Ground".to_string()),
        match_date: Utc.with_ymd_and_hms(2026, 4, 18, 15, 0, 0).unwrap(),
        round,
    }
}
