//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::domain::{AdminRoster, SystemClock, TokenAuthenticator};
use crate::error::CarouselError;
use crate::persistence::{
    CarouselItemRepository, InMemoryCarouselRepository, PostgresCarouselRepository,
};
use crate::service::CarouselItemService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Carousel item service for all business logic.
    pub carousel_service: Arc<CarouselItemService>,
}

impl AppState {
    /// Wraps an already-assembled service.
    #[must_use]
    pub fn new(carousel_service: CarouselItemService) -> Self {
        Self {
            carousel_service: Arc::new(carousel_service),
        }
    }

    /// Assembles the production collaborators described by `config`.
    ///
    /// Connects to PostgreSQL and runs migrations when persistence is
    /// enabled; otherwise items live in memory for the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::PersistenceError`] if the database cannot
    /// be reached or migrated.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self, CarouselError> {
        let repository: Arc<dyn CarouselItemRepository> = if config.persistence_enabled {
            let repo = PostgresCarouselRepository::connect(config).await?;
            repo.migrate().await?;
            tracing::info!("using PostgreSQL carousel repository");
            Arc::new(repo)
        } else {
            tracing::warn!("persistence disabled; carousel items are kept in memory");
            Arc::new(InMemoryCarouselRepository::new())
        };

        let service = CarouselItemService::new(
            repository,
            Arc::new(TokenAuthenticator::new(config.auth_tokens.clone())),
            Arc::new(AdminRoster::new(config.system_admins.iter().cloned())),
            Arc::new(SystemClock),
        );
        Ok(Self::new(service))
    }
}
