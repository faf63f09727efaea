use crate::models::DbUser;
use eyre::Result;
use slotbook_core::models::user::User;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, first_name, last_name, email, phone, position, department,
               role, worker_id, password_hash, registered_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, first_name, last_name, email, phone, position, department,
               role, worker_id, password_hash, registered_at
        FROM users
        WHERE lower(email) = lower($1)
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Returns `None` if the email is already taken.
pub async fn create_user(pool: &Pool<Postgres>, user: &User) -> Result<Option<DbUser>> {
    tracing::debug!("Creating user: id={}, role={}", user.id, user.role);

    let created = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, first_name, last_name, email, phone, position, department,
                           role, worker_id, password_hash, registered_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, first_name, last_name, email, phone, position, department,
                  role, worker_id, password_hash, registered_at
        "#,
    )
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(&user.position)
    .bind(&user.department)
    .bind(user.role.as_str())
    .bind(user.worker_id)
    .bind(&user.password_hash)
    .bind(user.registered_at)
    .fetch_optional(pool)
    .await?;

    Ok(created)
}

pub async fn update_user(pool: &Pool<Postgres>, user: &User) -> Result<Option<DbUser>> {
    let updated = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET first_name = $2, last_name = $3, phone = $4, position = $5,
            department = $6, role = $7, worker_id = $8, password_hash = $9
        WHERE id = $1
        RETURNING id, first_name, last_name, email, phone, position, department,
                  role, worker_id, password_hash, registered_at
        "#,
    )
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.phone)
    .bind(&user.position)
    .bind(&user.department)
    .bind(user.role.as_str())
    .bind(user.worker_id)
    .bind(&user.password_hash)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}
