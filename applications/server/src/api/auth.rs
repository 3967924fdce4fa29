/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::Serialize;
use voyage_core::{CoreError, LoginInput, NewUser, RegisterInput, User};

pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let Json(input) = payload?;
    let registration = input.validate()?;

    if app_state
        .storage
        .find_credentials(&registration.email)
        .await?
        .is_some()
    {
        return Err(ServerError::Validation(USER_EXISTS_MESSAGE.to_string()));
    }

    let password_hash = app_state.auth_service.hash_password(&registration.password)?;
    let user = app_state
        .storage
        .create_user(NewUser {
            name: registration.name,
            email: registration.email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration
            CoreError::Duplicate(_) => ServerError::Validation(USER_EXISTS_MESSAGE.to_string()),
            other => other.into(),
        })?;

    let token = app_state.auth_service.create_token(&user.id)?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(input) = payload?;
    let (email, password) = input.validate()?;

    let credentials = app_state
        .storage
        .find_credentials(&email)
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS_MESSAGE.to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&password, &credentials.password_hash)?
    {
        return Err(ServerError::Auth(INVALID_CREDENTIALS_MESSAGE.to_string()));
    }

    let user = credentials.user;
    let token = app_state.auth_service.create_token(&user.id)?;
    tracing::debug!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/auth/me
pub async fn me(auth: AuthenticatedUser) -> Json<User> {
    Json(auth.0)
}
