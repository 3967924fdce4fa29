//! User management and credential queries

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use voyage_core::{error::Result, CoreError, NewUser, User, UserCredentials, UserId};

/// Create a user
///
/// # Errors
///
/// Returns `CoreError::Duplicate` if the email is already registered
pub async fn create(pool: &SqlitePool, user: NewUser) -> Result<User> {
    let id = UserId::generate();
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(id.as_str())
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            CoreError::duplicate(format!("email {}", user.email))
        }
        other => other.into(),
    })?;

    from_row(&row)
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a user with their password hash, by normalized email
pub async fn get_credentials(pool: &SqlitePool, email: &str) -> Result<Option<UserCredentials>> {
    let row = sqlx::query(
        "SELECT id, name, email, created_at, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(|row| {
        Ok(UserCredentials {
            user: from_row(&row)?,
            password_hash: row.get("password_hash"),
        })
    })
    .transpose()
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, name, email, created_at FROM users ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

fn from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: UserId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        email: row.get("email"),
        created_at: timestamp(row.get("created_at"))?,
    })
}

pub(crate) fn timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| CoreError::storage(format!("Invalid timestamp: {}", millis)))
}
