/// API route modules
pub mod auth;
pub mod health;
pub mod itineraries;

use serde::Serialize;

/// `{ "message": ... }` body for confirmations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
