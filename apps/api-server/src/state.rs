//! Application state - shared across all handlers.

use std::sync::Arc;

use inkpost_core::ports::{BlogRepository, DashboardRepository, SessionValidator};
use inkpost_infra::database::{DbErr, PostgresBlogRepository, PostgresDashboardRepository};
use inkpost_infra::{JwtSessionValidator, database};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<dyn BlogRepository>,
    pub dashboard: Arc<dyn DashboardRepository>,
    pub sessions: Arc<dyn SessionValidator>,
}

impl AppState {
    /// Connect to the store and wire up the repositories.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let db = database::connect(&config.database).await?;

        let state = Self {
            blog: Arc::new(PostgresBlogRepository::new(db.clone())),
            dashboard: Arc::new(PostgresDashboardRepository::new(db)),
            sessions: Arc::new(JwtSessionValidator::from_env()),
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }
}
