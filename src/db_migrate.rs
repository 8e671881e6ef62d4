use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use slotbook_db::{create_pool, schema::initialize_database};
use tracing::{Level, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL must be set to bootstrap the slot schema")?;

    info!("Connecting to database...");
    let db_pool = create_pool(&database_url).await?;

    info!("Initializing time_slots schema...");
    initialize_database(&db_pool).await?;
    info!("Schema initialized successfully");

    Ok(())
}
