use crate::models::DbTimeSlot;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};

pub async fn get_time_slots(pool: &Pool<Postgres>) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, date, start_time, end_time, available
        FROM time_slots
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

pub async fn upsert_time_slot<'e, E>(executor: E, slot: &DbTimeSlot) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO time_slots (id, date, start_time, end_time, available)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE
        SET date = EXCLUDED.date,
            start_time = EXCLUDED.start_time,
            end_time = EXCLUDED.end_time,
            available = EXCLUDED.available
        "#,
    )
    .bind(&slot.id)
    .bind(slot.date)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(slot.available)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn update_time_slot_availability(
    pool: &Pool<Postgres>,
    id: &str,
    available: bool,
) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET available = $2
        WHERE id = $1
        RETURNING id, date, start_time, end_time, available
        "#,
    )
    .bind(id)
    .bind(available)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

pub async fn delete_time_slot(pool: &Pool<Postgres>, id: &str) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Deletes every slot dated in `[start_date, end_date]` and inserts `slots`,
/// all inside one transaction.
pub async fn replace_time_slots_in_range(
    pool: &Pool<Postgres>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    slots: &[DbTimeSlot],
) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let evicted = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE date BETWEEN $1 AND $2
        "#,
    )
    .bind(start_date)
    .bind(end_date)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    // One statement per row so a repeated id overwrites instead of failing
    for slot in slots {
        upsert_time_slot(&mut *tx, slot).await?;
    }

    tx.commit().await?;

    Ok(evicted)
}
