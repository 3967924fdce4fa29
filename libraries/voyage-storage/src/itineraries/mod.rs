//! Itinerary queries
//!
//! Every statement that touches an existing itinerary filters on
//! `id = ? AND user_id = ?` at once; there is no separate existence check.

use crate::users::timestamp;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use voyage_core::{
    error::Result, Destination, Itinerary, ItineraryId, NewItinerary, UserId,
};

/// Get the owner's itineraries, newest-created first
pub async fn get_by_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Itinerary>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, title, destinations, created_at, updated_at
        FROM itineraries
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(owner.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Create a new itinerary owned by `owner`
pub async fn create(
    pool: &SqlitePool,
    owner: &UserId,
    itinerary: NewItinerary,
) -> Result<Itinerary> {
    let id = ItineraryId::generate();
    let destinations = serde_json::to_string(&itinerary.destinations)?;
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query(
        r#"
        INSERT INTO itineraries (id, user_id, title, destinations, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, title, destinations, created_at, updated_at
        "#,
    )
    .bind(id.as_str())
    .bind(owner.as_str())
    .bind(&itinerary.title)
    .bind(destinations)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    from_row(&row)
}

/// Replace title and destinations of an owned itinerary
///
/// Returns `None` when no row matches both id and owner.
pub async fn update(
    pool: &SqlitePool,
    id: &ItineraryId,
    owner: &UserId,
    itinerary: NewItinerary,
) -> Result<Option<Itinerary>> {
    let destinations = serde_json::to_string(&itinerary.destinations)?;
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query(
        r#"
        UPDATE itineraries
        SET title = ?, destinations = ?, updated_at = ?
        WHERE id = ? AND user_id = ?
        RETURNING id, user_id, title, destinations, created_at, updated_at
        "#,
    )
    .bind(&itinerary.title)
    .bind(destinations)
    .bind(now)
    .bind(id.as_str())
    .bind(owner.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Delete an owned itinerary; `false` when no row matches both id and owner
pub async fn delete(pool: &SqlitePool, id: &ItineraryId, owner: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM itineraries WHERE id = ? AND user_id = ?")
        .bind(id.as_str())
        .bind(owner.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn from_row(row: &SqliteRow) -> Result<Itinerary> {
    let destinations: Vec<Destination> =
        serde_json::from_str(&row.get::<String, _>("destinations"))?;

    Ok(Itinerary {
        id: ItineraryId::new(row.get::<String, _>("id")),
        title: row.get("title"),
        owner_id: UserId::new(row.get::<String, _>("user_id")),
        destinations,
        created_at: timestamp(row.get("created_at"))?,
        updated_at: timestamp(row.get("updated_at"))?,
    })
}
