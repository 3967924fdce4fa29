//! Error types for the Voyage client.

use crate::types::MessageResponse;
use thiserror::Error;

/// Errors that can occur when talking to the Voyage API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server rejected the request body (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Record missing or not owned by the caller (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server returned another error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// No token stored, or the server rejected the stored token
    #[error("Authentication required")]
    AuthRequired,

    /// Login or registration was refused
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// The message the server sent, if any, otherwise `fallback`.
    ///
    /// This is what a UI should show the user.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg)
            | ClientError::NotFound(msg)
            | ClientError::AuthFailed(msg)
            | ClientError::ServerError { message: msg, .. }
                if !msg.is_empty() =>
            {
                msg.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Classify a transport failure.
pub(crate) fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Pull the `{ "message": ... }` body out of an error response, falling
/// back to the raw text.
pub(crate) async fn response_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<MessageResponse>(&text)
        .map(|m| m.message)
        .unwrap_or(text)
}

/// Map a non-success response from an authenticated endpoint to an error.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response_message(response).await;

    match status {
        400 => ClientError::Validation(message),
        401 => ClientError::AuthRequired,
        404 => ClientError::NotFound(message),
        _ => ClientError::ServerError { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_message() {
        let err = ClientError::NotFound("Itinerary not found".into());
        assert_eq!(err.user_message("Failed"), "Itinerary not found");

        let err = ClientError::ServerError { status: 500, message: String::new() };
        assert_eq!(err.user_message("Failed"), "Failed");

        assert_eq!(ClientError::AuthRequired.user_message("Failed"), "Failed");
    }
}
