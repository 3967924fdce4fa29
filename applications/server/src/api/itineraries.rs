/// Itinerary API routes
///
/// Every route is scoped to the authenticated caller. A record owned by
/// someone else answers exactly like a missing one.
use crate::{
    api::MessageResponse,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use voyage_core::{Itinerary, ItineraryId, ItineraryInput};

pub const NOT_FOUND_MESSAGE: &str = "Itinerary not found";
pub const DELETED_MESSAGE: &str = "Itinerary deleted";

/// GET /api/itineraries
/// The caller's itineraries, newest first
pub async fn list_itineraries(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Itinerary>>> {
    let itineraries = app_state
        .storage
        .list_itineraries(auth.user_id())
        .await?;
    Ok(Json(itineraries))
}

/// POST /api/itineraries
pub async fn create_itinerary(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<ItineraryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Itinerary>)> {
    let Json(input) = payload?;
    let itinerary = input.validate()?;

    let created = app_state
        .storage
        .create_itinerary(auth.user_id(), itinerary)
        .await?;
    tracing::debug!(itinerary_id = %created.id, user_id = %auth.user_id(), "Itinerary created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/itineraries/:id
/// Replace title and destinations
pub async fn update_itinerary(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ItineraryInput>, JsonRejection>,
) -> Result<Json<Itinerary>> {
    let Json(input) = payload?;
    let itinerary = input.validate()?;

    let updated = app_state
        .storage
        .update_itinerary(&ItineraryId::new(id), auth.user_id(), itinerary)
        .await?
        .ok_or_else(|| ServerError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    Ok(Json(updated))
}

/// DELETE /api/itineraries/:id
pub async fn delete_itinerary(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = ItineraryId::new(id);
    let deleted = app_state
        .storage
        .delete_itinerary(&id, auth.user_id())
        .await?;

    if !deleted {
        return Err(ServerError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    tracing::debug!(itinerary_id = %id, "Itinerary deleted");
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}
