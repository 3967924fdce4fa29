//! Authentication methods for the Voyage API.

use crate::error::{error_from_response, response_message, send_error, ClientError, Result};
use crate::types::{AuthResponse, LoginRequest, RegisterRequest};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, info, warn};
use voyage_core::User;

/// Authentication client for the Voyage API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Create an account. Returns a token on success.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/register", self.base_url);
        debug!(url = %url, email = %email, "Registering account");

        let request = RegisterRequest {
            name,
            email,
            password,
        };
        let response = self.post(&url, &request).await?;
        let auth = Self::auth_response(response).await?;

        info!(user_id = %auth.user.id, "Registration successful");
        Ok(auth)
    }

    /// Login with email and password. Returns a token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let request = LoginRequest { email, password };
        let response = self.post(&url, &request).await?;
        let auth = Self::auth_response(response).await?;

        info!(user_id = %auth.user.id, "Login successful");
        Ok(auth)
    }

    /// Get the user a token belongs to.
    pub async fn current_user(&self, token: &str) -> Result<User> {
        let url = format!("{}/auth/me", self.base_url);
        debug!(url = %url, "Getting current user");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(send_error)?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse user: {}", e))
            })
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Whether a token is still accepted by the server.
    pub async fn validate_token(&self, token: &str) -> Result<bool> {
        match self.current_user(token).await {
            Ok(_) => Ok(true),
            Err(ClientError::AuthRequired) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn post<T: Serialize>(&self, url: &str, body: &T) -> Result<Response> {
        self.http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(send_error)
    }

    async fn auth_response(response: Response) -> Result<AuthResponse> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse auth response: {}", e))
            })
        } else if status.as_u16() == 400 || status.as_u16() == 401 {
            let message = response_message(response).await;
            warn!(status = %status, error = %message, "Authentication refused");
            Err(ClientError::AuthFailed(message))
        } else {
            Err(error_from_response(response).await)
        }
    }
}
