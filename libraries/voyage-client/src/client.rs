//! Main Voyage API client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::itineraries::ItineraryClient;
use crate::planner::ItineraryApi;
use crate::types::{AuthResponse, ClientConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use voyage_core::{Itinerary, ItineraryId, ItineraryInput, User};

/// Main client for the Voyage API.
///
/// Holds the token issued at login/register and injects it into every
/// itinerary request.
///
/// # Example
///
/// ```ignore
/// use voyage_client::{ClientConfig, VoyageClient};
///
/// let client = VoyageClient::new(ClientConfig::new("http://localhost:5000/api"))?;
/// client.login("ada@example.com", "secret").await?;
///
/// let itineraries = client.itineraries().await?.client().list().await?;
/// println!("Found {} itineraries", itineraries.len());
/// ```
pub struct VoyageClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl VoyageClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Voyage/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig {
                url,
                token: config.token,
            })),
        })
    }

    /// Get the API base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has a token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.token.is_some()
    }

    /// Create an account; the returned token is stored for later requests.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let url = self.url().await;
        let response = AuthClient::new(&self.http, &url)
            .register(name, email, password)
            .await?;

        self.config.write().await.token = Some(response.token.clone());
        Ok(response)
    }

    /// Login; the returned token is stored for later requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = self.url().await;
        let response = AuthClient::new(&self.http, &url).login(email, password).await?;

        self.config.write().await.token = Some(response.token.clone());
        Ok(response)
    }

    /// Set the token directly (e.g., from stored credentials).
    pub async fn set_token(&self, token: impl Into<String>) {
        self.config.write().await.token = Some(token.into());
    }

    /// Get the current token.
    pub async fn token(&self) -> Option<String> {
        self.config.read().await.token.clone()
    }

    /// Clear the stored token.
    pub async fn logout(&self) {
        self.config.write().await.token = None;
        info!("Logged out");
    }

    /// The user the stored token belongs to.
    pub async fn current_user(&self) -> Result<User> {
        let (url, token) = self.credentials().await?;
        AuthClient::new(&self.http, &url).current_user(&token).await
    }

    /// Whether the stored token is still accepted. `false` without a token.
    pub async fn validate_token(&self) -> Result<bool> {
        match self.credentials().await {
            Ok((url, token)) => AuthClient::new(&self.http, &url).validate_token(&token).await,
            Err(ClientError::AuthRequired) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Get an itinerary client.
    ///
    /// Returns an error if not authenticated.
    pub async fn itineraries(&self) -> Result<ItineraryClientHandle> {
        let (url, token) = self.credentials().await?;
        Ok(ItineraryClientHandle {
            http: self.http.clone(),
            url,
            token,
        })
    }

    async fn credentials(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config.token.clone().ok_or(ClientError::AuthRequired)?;
        Ok((config.url.clone(), token))
    }
}

/// Handle for itinerary operations.
///
/// Returned by `VoyageClient::itineraries()`.
pub struct ItineraryClientHandle {
    http: Client,
    url: String,
    token: String,
}

impl ItineraryClientHandle {
    /// Get the itinerary client.
    pub fn client(&self) -> ItineraryClient<'_> {
        ItineraryClient::new(&self.http, &self.url, &self.token)
    }
}

#[async_trait]
impl ItineraryApi for VoyageClient {
    async fn list(&self) -> Result<Vec<Itinerary>> {
        self.itineraries().await?.client().list().await
    }

    async fn create(&self, input: &ItineraryInput) -> Result<Itinerary> {
        self.itineraries().await?.client().create(input).await
    }

    async fn update(&self, id: &ItineraryId, input: &ItineraryInput) -> Result<Itinerary> {
        self.itineraries().await?.client().update(id, input).await
    }

    async fn delete(&self, id: &ItineraryId) -> Result<()> {
        self.itineraries().await?.client().delete(id).await.map(|_| ())
    }
}
