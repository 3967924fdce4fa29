use crate::{create_pool, itineraries, run_migrations, users, StorageError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use voyage_core::{
    error::Result, Itinerary, ItineraryId, NewItinerary, NewUser, Storage, User,
    UserCredentials, UserId,
};

/// `Storage` backed by a `SQLite` pool
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if missing) the database and apply migrations
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    // Users
    async fn create_user(&self, user: NewUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>> {
        users::get_credentials(&self.pool, email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    // Itineraries
    async fn list_itineraries(&self, owner: &UserId) -> Result<Vec<Itinerary>> {
        itineraries::get_by_owner(&self.pool, owner).await
    }

    async fn create_itinerary(
        &self,
        owner: &UserId,
        itinerary: NewItinerary,
    ) -> Result<Itinerary> {
        itineraries::create(&self.pool, owner, itinerary).await
    }

    async fn update_itinerary(
        &self,
        id: &ItineraryId,
        owner: &UserId,
        itinerary: NewItinerary,
    ) -> Result<Option<Itinerary>> {
        itineraries::update(&self.pool, id, owner, itinerary).await
    }

    async fn delete_itinerary(&self, id: &ItineraryId, owner: &UserId) -> Result<bool> {
        itineraries::delete(&self.pool, id, owner).await
    }
}
