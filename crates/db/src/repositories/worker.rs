use crate::models::{minutes, DbWorker};
use eyre::Result;
use slotbook_core::models::worker::Worker;
use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

pub async fn list_workers(pool: &Pool<Postgres>) -> Result<Vec<DbWorker>> {
    let workers = sqlx::query_as::<_, DbWorker>(
        r#"
        SELECT id, name, email, phone, position, department,
               start_minute, end_minute, breaks, is_active
        FROM workers
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(workers)
}

pub async fn get_worker_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbWorker>> {
    tracing::debug!("Getting worker by id: {}", id);

    let worker = sqlx::query_as::<_, DbWorker>(
        r#"
        SELECT id, name, email, phone, position, department,
               start_minute, end_minute, breaks, is_active
        FROM workers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(worker)
}

pub async fn upsert_worker(pool: &Pool<Postgres>, worker: &Worker) -> Result<DbWorker> {
    tracing::debug!("Saving worker: id={}, name={}", worker.id, worker.name);

    let saved = sqlx::query_as::<_, DbWorker>(
        r#"
        INSERT INTO workers (id, name, email, phone, position, department,
                             start_minute, end_minute, breaks, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            email = EXCLUDED.email,
            phone = EXCLUDED.phone,
            position = EXCLUDED.position,
            department = EXCLUDED.department,
            start_minute = EXCLUDED.start_minute,
            end_minute = EXCLUDED.end_minute,
            breaks = EXCLUDED.breaks,
            is_active = EXCLUDED.is_active
        RETURNING id, name, email, phone, position, department,
                  start_minute, end_minute, breaks, is_active
        "#,
    )
    .bind(worker.id)
    .bind(&worker.name)
    .bind(&worker.email)
    .bind(&worker.phone)
    .bind(&worker.position)
    .bind(&worker.department)
    .bind(minutes(worker.schedule.start()))
    .bind(minutes(worker.schedule.end()))
    .bind(Json(worker.schedule.breaks().to_vec()))
    .bind(worker.is_active)
    .fetch_one(pool)
    .await?;

    Ok(saved)
}

/// Returns whether a row was deleted.
pub async fn delete_worker(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM workers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
