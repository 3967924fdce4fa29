//! Itinerary CRUD against the Voyage API.

use crate::error::{error_from_response, send_error, ClientError, Result};
use crate::types::MessageResponse;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use voyage_core::{Itinerary, ItineraryId, ItineraryInput};

/// Itinerary client for the Voyage API.
pub struct ItineraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> ItineraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// All of the caller's itineraries, newest first.
    pub async fn list(&self) -> Result<Vec<Itinerary>> {
        let url = format!("{}/itineraries", self.base_url);
        debug!(url = %url, "Fetching itineraries");

        let itineraries: Vec<Itinerary> = self.send(self.http.get(&url)).await?;
        debug!(count = itineraries.len(), "Fetched itineraries");
        Ok(itineraries)
    }

    /// Create an itinerary owned by the caller.
    pub async fn create(&self, input: &ItineraryInput) -> Result<Itinerary> {
        let url = format!("{}/itineraries", self.base_url);
        debug!(url = %url, "Creating itinerary");

        self.send(self.http.post(&url).json(input)).await
    }

    /// Replace the title and destinations of an itinerary.
    pub async fn update(&self, id: &ItineraryId, input: &ItineraryInput) -> Result<Itinerary> {
        let url = format!("{}/itineraries/{}", self.base_url, id);
        debug!(url = %url, "Updating itinerary");

        self.send(self.http.put(&url).json(input)).await
    }

    /// Delete an itinerary. Returns the server's confirmation message.
    pub async fn delete(&self, id: &ItineraryId) -> Result<String> {
        let url = format!("{}/itineraries/{}", self.base_url, id);
        debug!(url = %url, "Deleting itinerary");

        let confirmation: MessageResponse = self.send(self.http.delete(&url)).await?;
        Ok(confirmation.message)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response: Response = request
            .bearer_auth(self.token)
            .send()
            .await
            .map_err(send_error)?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse itinerary response: {}", e))
            })
        } else {
            Err(error_from_response(response).await)
        }
    }
}
