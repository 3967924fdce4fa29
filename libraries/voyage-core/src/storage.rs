//! Storage trait for owner-scoped persistence

use crate::error::Result;
use crate::types::{Itinerary, ItineraryId, NewItinerary, NewUser, User, UserCredentials, UserId};
use async_trait::async_trait;

/// Persistence operations used by the server
///
/// Every itinerary operation takes the caller's `owner` and must apply it in
/// the same query as any id filter, so a record owned by someone else looks
/// exactly like a missing one.
#[async_trait]
pub trait Storage: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user; fails with `CoreError::Duplicate` if the email is taken
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Look up a user and password hash by (normalized) email
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>>;

    /// Get all users (CLI/admin use)
    async fn list_users(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Itineraries
    // ========================================================================

    /// Owner's itineraries, newest-created first
    async fn list_itineraries(&self, owner: &UserId) -> Result<Vec<Itinerary>>;

    /// Persist a new itinerary owned by `owner`
    async fn create_itinerary(&self, owner: &UserId, itinerary: NewItinerary)
        -> Result<Itinerary>;

    /// Replace title and destinations; `None` if missing or not owned
    async fn update_itinerary(
        &self,
        id: &ItineraryId,
        owner: &UserId,
        itinerary: NewItinerary,
    ) -> Result<Option<Itinerary>>;

    /// Delete; `false` if missing or not owned
    async fn delete_itinerary(&self, id: &ItineraryId, owner: &UserId) -> Result<bool>;
}
