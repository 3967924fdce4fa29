//! Voyage Core
//!
//! Platform-agnostic domain types, validation rules, and the storage trait
//! shared by the Voyage server, storage layer, and client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Itinerary`, `Destination` and their IDs
//! - **Validation**: lenient request inputs checked into validated values
//! - **Storage Trait**: owner-scoped persistence operations
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use voyage_core::validation::ItineraryInput;
//!
//! let input: ItineraryInput = serde_json::from_str(
//!     r#"{
//!         "title": "Europe Trip",
//!         "destinations": [
//!             { "location": "Paris", "startDate": "2024-06-01", "endDate": "2024-06-05" }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let itinerary = input.validate().unwrap();
//! assert_eq!(itinerary.title, "Europe Trip");
//! assert_eq!(itinerary.destinations.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{CoreError, Result};
pub use storage::Storage;

pub use types::{
    Destination, Itinerary, ItineraryId, NewItinerary, NewUser, User, UserCredentials, UserId,
};
pub use validation::{
    DestinationInput, ItineraryInput, LoginInput, Registration, RegisterInput, ValidationError,
};
