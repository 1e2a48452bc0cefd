//! Touchline application composition root
//!
//! Wires every domain service onto one shared league store.

use std::sync::Arc;

use touchline_common::Config;
use touchline_competitions::{CompetitionService, RegistrationService};
use touchline_matches::{MatchService, MatchSheetService};
use touchline_store::{LeagueStore, StoreFactory};
use touchline_teams::TeamDirectory;

/// All league services, sharing one store
#[derive(Clone)]
pub struct LeagueServices {
    pub competitions: CompetitionService,
    pub registration: RegistrationService,
    pub matches: MatchService,
    pub sheets: MatchSheetService,
    pub teams: TeamDirectory,
    store: Arc<dyn LeagueStore>,
}

impl LeagueServices {
    pub fn from_store(store: Arc<dyn LeagueStore>) -> Self {
        Self {
            competitions: CompetitionService::new(store.clone()),
            registration: RegistrationService::new(store.clone()),
            matches: MatchService::new(store.clone()),
            sheets: MatchSheetService::new(store.clone()),
            teams: TeamDirectory::new(store.clone()),
            store,
        }
    }

    /// Build the services on the store selected by `config`
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = StoreFactory::create(config).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create league store");
            anyhow::anyhow!("Store initialisation failed: {}", e)
        })?;

        tracing::info!(provider = %store.provider(), "League services ready");
        Ok(Self::from_store(store))
    }

    pub fn store(&self) -> Arc<dyn LeagueStore> {
        self.store.clone()
    }
}
