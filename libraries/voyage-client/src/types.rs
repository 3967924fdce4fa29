//! Types for Voyage API requests and responses.

use serde::{Deserialize, Serialize};
use voyage_core::User;

/// Default API base URL when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Configuration for connecting to the Voyage API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix
    /// (e.g., "https://voyage.example.com/api")
    pub url: String,
    /// Bearer token issued at login/register
    pub token: Option<String>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
        }
    }

    /// Create a config with a previously stored token.
    pub fn with_token(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: Some(token.into()),
        }
    }
}

/// Environment-provided settings for a planner front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerSettings {
    /// API base URL (`VOYAGE_API_URL`)
    pub api_url: String,
    /// Map provider key (`VOYAGE_MAPS_API_KEY`)
    pub maps_api_key: Option<String>,
}

impl PlannerSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (handy for tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("VOYAGE_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            maps_api_key: lookup("VOYAGE_MAPS_API_KEY").filter(|v| !v.trim().is_empty()),
        }
    }

    /// Client configuration for these settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the register endpoint.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from a successful login or registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// `{ "message": ... }` body used for errors and confirmations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
