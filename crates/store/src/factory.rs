//! Backend selection

use std::sync::Arc;

use touchline_common::{Config, RepositoryError, StoreProvider};

use crate::memory::MemoryStore;
use crate::postgres::PgStore;
use crate::repository::LeagueStore;

pub struct StoreFactory;

impl StoreFactory {
    /// Create the store configured by `config.store_provider`
    pub async fn create(config: &Config) -> Result<Arc<dyn LeagueStore>, RepositoryError> {
        match config.store_provider {
            StoreProvider::Memory => {
                tracing::info!("Creating in-memory league store");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreProvider::Postgres => {
                tracing::info!(
                    max_connections = config.database_max_connections,
                    "Creating PostgreSQL league store"
                );
                let store = PgStore::connect(config).await?;
                if config.run_migrations {
                    store.migrate().await?;
                }
                Ok(Arc::new(store))
            }
        }
    }
}
