//! Application state for concierge-server

use shared::error::AppError;

use crate::config::Config;
use crate::db::DbService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite database service
    pub db: DbService,
    /// JWT secret shared with the identity provider
    pub jwt_secret: String,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;

        Ok(Self {
            db,
            jwt_secret: config.jwt_secret.clone(),
        })
    }

    /// State over an in-memory database (tests, ephemeral runs)
    pub async fn in_memory(jwt_secret: &str) -> Result<Self, AppError> {
        let db = DbService::in_memory().await?;

        Ok(Self {
            db,
            jwt_secret: jwt_secret.to_string(),
        })
    }
}
