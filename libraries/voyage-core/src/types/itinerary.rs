/// Itinerary domain types
use crate::types::{ItineraryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stop on an itinerary
///
/// Destinations are embedded in their itinerary and have no identity of
/// their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Location name
    pub location: String,

    /// First day at this destination
    pub start_date: DateTime<Utc>,

    /// Last day at this destination
    pub end_date: DateTime<Utc>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Latitude in decimal degrees
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Destination {
    /// Both coordinates, if both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Whether this destination can be placed on a map
    pub fn is_plottable(&self) -> bool {
        self.coordinates().is_some()
    }
}

/// A titled, owned collection of destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Unique itinerary identifier
    pub id: ItineraryId,

    /// Itinerary title
    pub title: String,

    /// Owning user
    #[serde(rename = "user")]
    pub owner_id: UserId,

    /// Destinations in travel order
    pub destinations: Vec<Destination>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Itinerary {
    /// Destinations that carry both coordinates
    pub fn plottable_destinations(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter().filter(|d| d.is_plottable())
    }
}

/// Validated itinerary content, used for both create and full replacement
///
/// Obtain one through [`crate::validation::ItineraryInput::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItinerary {
    /// Trimmed, non-empty title
    pub title: String,
    /// At least one destination
    pub destinations: Vec<Destination>,
}
