//! Voyage API Client
//!
//! Client-side pieces of the itinerary planner.
//!
//! # Features
//!
//! - **Authentication**: register, login, token validation
//! - **Itineraries**: list, create, update and delete the caller's itineraries
//! - **Page state**: the itineraries form and list, generic over [`ItineraryApi`]
//! - **Map**: marker selection and script load states for the map widget
//!
//! # Example
//!
//! ```ignore
//! use voyage_client::{ItinerariesPage, MapView, PlannerSettings, VoyageClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = PlannerSettings::from_env();
//!     let client = VoyageClient::new(settings.client_config())?;
//!     client.login("ada@example.com", "secret").await?;
//!
//!     let mut page = ItinerariesPage::new(client);
//!     page.refresh().await;
//!
//!     let map = MapView::new(settings.maps_api_key.as_deref(), page.map_destinations());
//!     println!("{} markers", map.markers().len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod itineraries;
pub mod map;
pub mod planner;
mod types;

pub use client::{ItineraryClientHandle, VoyageClient};
pub use error::{ClientError, Result};
pub use map::{LatLng, MapRender, MapScene, MapView, Marker, ScriptStatus};
pub use planner::{
    DestinationDraft, DestinationEdit, ItinerariesPage, ItineraryApi, ItineraryDraft,
};
pub use types::{
    AuthResponse, ClientConfig, MessageResponse, PlannerSettings, DEFAULT_API_URL,
};

// Sub-clients for direct use
pub use auth::AuthClient;
pub use itineraries::ItineraryClient;
