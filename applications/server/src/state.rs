/// Shared application state
use crate::{
    config::ServerConfig,
    error::{Result, ServerError},
    services::AuthService,
};
use std::sync::Arc;
use voyage_core::Storage;
use voyage_storage::SqliteStorage;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, auth_service: Arc<AuthService>) -> Self {
        Self {
            storage,
            auth_service,
        }
    }

    /// Open the configured database (applying migrations) and build the
    /// auth service from the auth settings.
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        ensure_database_dir(&config.storage.database_url).await?;
        let storage = SqliteStorage::connect(&config.storage.database_url).await?;
        tracing::info!("Database connected");

        let auth_service = AuthService::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_expiration_hours,
        )
        .with_cost(config.auth.bcrypt_cost);

        Ok(Self::new(Arc::new(storage), Arc::new(auth_service)))
    }
}

/// SQLite creates the file but not its directory
async fn ensure_database_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ServerError::Config(format!("Cannot create database directory {:?}: {}", parent, e))
            })?;
        }
    }
    Ok(())
}
