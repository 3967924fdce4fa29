/// User domain types
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account
///
/// The credential hash is kept out of this type so it can never end up in
/// a response body; see [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Login email, stored lower-cased
    pub email: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Login email (already normalized)
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
}

/// A user together with the stored password hash, used only during login
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// The account
    pub user: User,
    /// bcrypt hash of the password
    pub password_hash: String,
}
