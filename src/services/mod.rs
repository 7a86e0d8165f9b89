//! Services module
//!
//! This module contains the remote collaborators and the services built on them

pub mod api;
pub mod cache;
pub mod events;
pub mod image_store;
pub mod user;

// Re-export commonly used services
pub use api::{VolunteamApi, HttpApiClient};
pub use cache::{CacheService, CacheStore, CacheFirst, FetchSource, MemoryCacheStore, RedisCacheStore};
pub use events::EventService;
pub use image_store::{ImageStore, HttpImageStore};
pub use user::UserService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::state::events::EventsStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub image_store: Arc<dyn ImageStore>,
    pub cache: CacheService,
    pub user_service: UserService,
    pub event_service: EventService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with HTTP backends built from settings
    pub fn new(settings: Settings, events: EventsStore) -> Result<Self> {
        let api: Arc<dyn VolunteamApi> = Arc::new(HttpApiClient::new(&settings.api)?);
        let image_store: Arc<dyn ImageStore> = Arc::new(HttpImageStore::new(settings.image_store.clone())?);
        let cache = CacheService::from_config(&settings.cache)?;

        Ok(Self::with_backends(settings, api, image_store, cache, events))
    }

    /// Assemble services over already-built backends
    pub fn with_backends(
        settings: Settings,
        api: Arc<dyn VolunteamApi>,
        image_store: Arc<dyn ImageStore>,
        cache: CacheService,
        events: EventsStore,
    ) -> Self {
        let user_service = UserService::new(api.clone(), cache.clone());
        let event_service = EventService::new(api, events);

        Self {
            settings,
            image_store,
            cache,
            user_service,
            event_service,
        }
    }

    pub fn events(&self) -> &EventsStore {
        self.event_service.store()
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let cache_healthy = self.cache.store().health_check().await.unwrap_or(false);

        ServiceHealthStatus {
            cache_healthy,
            image_uploads_enabled: !self.settings.image_store.api_key.is_empty(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub cache_healthy: bool,
    pub image_uploads_enabled: bool,
}

impl ServiceHealthStatus {
    /// Get list of degraded services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.cache_healthy {
            issues.push("Cache backend unavailable".to_string());
        }
        if !self.image_uploads_enabled {
            issues.push("Image store API key not configured".to_string());
        }

        issues
    }
}
