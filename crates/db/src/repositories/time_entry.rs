use crate::models::{minutes, DbTimeEntry};
use eyre::Result;
use slotbook_core::models::time_entry::TimeEntry;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_time_entries(pool: &Pool<Postgres>) -> Result<Vec<DbTimeEntry>> {
    let entries = sqlx::query_as::<_, DbTimeEntry>(
        r#"
        SELECT id, worker_id, date, hours, start_minute, end_minute, description
        FROM time_entries
        ORDER BY date DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

pub async fn get_time_entries_by_worker_id(
    pool: &Pool<Postgres>,
    worker_id: Uuid,
) -> Result<Vec<DbTimeEntry>> {
    let entries = sqlx::query_as::<_, DbTimeEntry>(
        r#"
        SELECT id, worker_id, date, hours, start_minute, end_minute, description
        FROM time_entries
        WHERE worker_id = $1
        ORDER BY date DESC
        "#,
    )
    .bind(worker_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

pub async fn create_time_entry(pool: &Pool<Postgres>, entry: &TimeEntry) -> Result<DbTimeEntry> {
    let created = sqlx::query_as::<_, DbTimeEntry>(
        r#"
        INSERT INTO time_entries (id, worker_id, date, hours, start_minute, end_minute, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, worker_id, date, hours, start_minute, end_minute, description
        "#,
    )
    .bind(entry.id)
    .bind(entry.worker_id)
    .bind(entry.date)
    .bind(entry.hours)
    .bind(entry.start_time.map(minutes))
    .bind(entry.end_time.map(minutes))
    .bind(entry.description.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(created)
}
