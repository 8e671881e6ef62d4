use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::config::ApiConfig;
use slotbook_core::seed;
use slotbook_db::{
    backend::SlotBackend, create_pool, memory::InMemorySlotBackend, postgres::PgSlotBackend,
    schema::initialize_database,
};
use slotbook_store::SlotStore;
use tracing::{info, warn};

async fn build_backend(config: &ApiConfig) -> Result<Arc<dyn SlotBackend>> {
    if let Some(database_url) = &config.database_url {
        let db_pool = create_pool(database_url).await?;
        initialize_database(&db_pool).await?;
        info!("Using PostgreSQL slot backend");
        return Ok(Arc::new(PgSlotBackend::new(db_pool)));
    }

    let slots = if config.seed_demo_slots {
        let today = chrono::Local::now().date_naive();
        seed::demo_slots(today, &mut rand::thread_rng())
    } else {
        Vec::new()
    };
    info!(
        "Using in-memory slot backend: seeded={}, latency={:?}",
        slots.len(),
        config.memory_latency
    );

    Ok(Arc::new(
        InMemorySlotBackend::with_slots(slots).with_latency(config.memory_latency),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    slotbook_api::init_tracing(config.log_level)?;

    let backend = build_backend(&config).await?;
    let store = SlotStore::spawn(backend, config.store_config());

    // A failed initial load leaves an empty collection; the next fetch retries
    if let Err(err) = store.fetch_all().await {
        warn!("Initial slot fetch failed: {}", err);
    }

    slotbook_api::start_server(config, store).await?;

    Ok(())
}
