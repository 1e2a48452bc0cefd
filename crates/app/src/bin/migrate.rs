// Touchline - apply database migrations

use tracing::{error, info};

use touchline_common::{telemetry::init_tracing, Config, StoreProvider};
use touchline_store::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    if config.store_provider != StoreProvider::Postgres {
        info!(provider = %config.store_provider, "Nothing to migrate");
        return Ok(());
    }

    let store = PgStore::connect(&config).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        anyhow::anyhow!("Database connection failed: {}", e)
    })?;

    info!("Database connection established");

    store.migrate().await.map_err(|e| {
        error!("Migration failed: {}", e);
        anyhow::anyhow!("Migration failed: {}", e)
    })?;

    info!("Migrations applied");
    Ok(())
}
