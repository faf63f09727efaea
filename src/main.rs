use std::sync::Arc;

use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use slotbook_api::config::{ApiConfig, StoreBackend};
use slotbook_core::store::RecordStore;
use slotbook_db::{create_pool, schema::initialize_database, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Pick the record store
    let store: Arc<dyn RecordStore> = match config.store_backend {
        StoreBackend::Memory if config.seed_default_data => Arc::new(MemoryStore::seeded()?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| eyre!("DATABASE_URL is required for the postgres backend"))?;

            // Create database connection pool and make sure the schema exists
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            Arc::new(PgStore::new(db_pool))
        }
    };

    // Start API server
    slotbook_api::start_server(config, store).await?;

    Ok(())
}
