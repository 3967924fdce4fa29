/// Authentication middleware
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use voyage_core::{User, UserId};

pub const NO_TOKEN_MESSAGE: &str = "No token, authorization denied";
pub const INVALID_TOKEN_MESSAGE: &str = "Token is not valid";

/// The user a request's token resolved to.
/// Can be used as an extractor in handlers behind [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0.id
    }
}

/// Middleware that resolves the bearer token to a stored user
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|h| h.strip_prefix("Bearer ").unwrap_or(h).trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::Auth(NO_TOKEN_MESSAGE.to_string()))?;

    let user_id = app_state.auth_service.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::Auth(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    // A valid signature for a user that no longer exists is still invalid
    let user = app_state.storage.get_user(&user_id).await?.ok_or_else(|| {
        tracing::warn!(user_id = %user_id, "Token subject not found");
        ServerError::Auth(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth(NO_TOKEN_MESSAGE.to_string()))
    }
}
