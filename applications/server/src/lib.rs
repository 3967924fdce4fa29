//! Voyage Server Library
//!
//! Multi-user itinerary API with JWT authentication over `SQLite` storage.
//!
//! This library exposes the router and its components so tests and the
//! binary build the same application.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

/// Build the full application router, mounted under `/api`
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/me", get(api::auth::me))
        .route(
            "/itineraries",
            get(api::itineraries::list_itineraries).post(api::itineraries::create_itinerary),
        )
        .route(
            "/itineraries/:id",
            put(api::itineraries::update_itinerary).delete(api::itineraries::delete_itinerary),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn not_found() -> ServerError {
    ServerError::NotFound("Route not found".to_string())
}
