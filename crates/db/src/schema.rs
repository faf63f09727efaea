use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create workers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NOT NULL DEFAULT '',
            position VARCHAR(255) NOT NULL DEFAULT '',
            department VARCHAR(255) NOT NULL,
            start_minute SMALLINT NOT NULL,
            end_minute SMALLINT NOT NULL,
            breaks JSONB NOT NULL DEFAULT '[]',
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT valid_work_window CHECK (
                start_minute >= 0 AND end_minute < 1440 AND start_minute < end_minute
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            worker_id UUID NOT NULL,
            worker_name VARCHAR(255) NOT NULL,
            department VARCHAR(255) NOT NULL,
            date DATE NOT NULL,
            time_minute SMALLINT NOT NULL,
            requested_by VARCHAR(255) NOT NULL,
            reason VARCHAR(500) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled')),
            CONSTRAINT valid_time CHECK (time_minute >= 0 AND time_minute < 1440)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one live appointment per worker, date and time
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS appointments_live_slot
        ON appointments (worker_id, date, time_minute)
        WHERE status <> 'cancelled';
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_worker_date
        ON appointments (worker_id, date);
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_entries table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            worker_id UUID NOT NULL,
            date DATE NOT NULL,
            hours DOUBLE PRECISION NOT NULL,
            start_minute SMALLINT NULL,
            end_minute SMALLINT NULL,
            description TEXT NULL,
            CONSTRAINT valid_hours CHECK (hours > 0 AND hours <= 24)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL DEFAULT '',
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(64) NOT NULL DEFAULT '',
            position VARCHAR(255) NOT NULL DEFAULT '',
            department VARCHAR(255) NOT NULL DEFAULT '',
            role VARCHAR(16) NOT NULL DEFAULT 'user',
            worker_id UUID NULL REFERENCES workers(id) ON DELETE SET NULL,
            password_hash VARCHAR(255) NOT NULL,
            registered_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('user', 'worker', 'admin'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully");
    Ok(())
}
