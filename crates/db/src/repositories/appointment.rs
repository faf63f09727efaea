use crate::models::{minutes, DbAppointment};
use chrono::NaiveDate;
use eyre::Result;
use slotbook_core::models::appointment::{Appointment, AppointmentStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_appointments(pool: &Pool<Postgres>) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, worker_id, worker_name, department, date, time_minute,
               requested_by, reason, status, created_at
        FROM appointments
        ORDER BY date ASC, time_minute ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, worker_id, worker_name, department, date, time_minute,
               requested_by, reason, status, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_appointments_by_worker_and_date(
    pool: &Pool<Postgres>,
    worker_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, worker_id, worker_name, department, date, time_minute,
               requested_by, reason, status, created_at
        FROM appointments
        WHERE worker_id = $1 AND date = $2
        ORDER BY time_minute ASC
        "#,
    )
    .bind(worker_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Inserts unless a live appointment already holds the slot, in which case
/// `None` is returned. Relies on the `appointments_live_slot` partial index.
pub async fn insert_appointment_if_free(
    pool: &Pool<Postgres>,
    appointment: &Appointment,
) -> Result<Option<DbAppointment>> {
    tracing::debug!(
        "Inserting appointment: id={}, worker_id={}, date={}, time={}",
        appointment.id, appointment.worker_id, appointment.date, appointment.time
    );

    let inserted = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, worker_id, worker_name, department, date, time_minute,
                                  requested_by, reason, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (worker_id, date, time_minute) WHERE status <> 'cancelled'
        DO NOTHING
        RETURNING id, worker_id, worker_name, department, date, time_minute,
                  requested_by, reason, status, created_at
        "#,
    )
    .bind(appointment.id)
    .bind(appointment.worker_id)
    .bind(&appointment.worker_name)
    .bind(&appointment.department)
    .bind(appointment.date)
    .bind(minutes(appointment.time))
    .bind(&appointment.requested_by)
    .bind(&appointment.reason)
    .bind(appointment.status.as_str())
    .bind(appointment.created_at)
    .fetch_optional(pool)
    .await?;

    Ok(inserted)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    let updated = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING id, worker_id, worker_name, department, date, time_minute,
                  requested_by, reason, status, created_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Returns whether a row was deleted.
pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
