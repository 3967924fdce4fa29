//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations and constraints.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use voyage_core::{Destination, NewItinerary, NewUser, Storage, User};
use voyage_storage::SqliteStorage;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub storage: SqliteStorage,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let storage = SqliteStorage::connect(&db_url)
            .await
            .expect("Failed to open test database");

        Self {
            storage,
            _temp_dir: temp_dir,
        }
    }
}

/// Test fixture: Create a test user
pub async fn create_test_user(storage: &SqliteStorage, name: &str) -> User {
    storage
        .create_user(NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .expect("Failed to create test user")
}

/// Test fixture: A destination on the given June day range
pub fn destination(location: &str, start_day: u32, end_day: u32) -> Destination {
    Destination {
        location: location.to_string(),
        start_date: Utc.with_ymd_and_hms(2024, 6, start_day, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 6, end_day, 0, 0, 0).unwrap(),
        notes: None,
        latitude: None,
        longitude: None,
    }
}

/// Test fixture: An itinerary with the given destinations
pub fn new_itinerary(title: &str, destinations: Vec<Destination>) -> NewItinerary {
    NewItinerary {
        title: title.to_string(),
        destinations,
    }
}
