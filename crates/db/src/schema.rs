use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id VARCHAR(32) PRIMARY KEY,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            available BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT unique_date_start UNIQUE (date, start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Range replacement filters by date
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_time_slots_date ON time_slots(date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
