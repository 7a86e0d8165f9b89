//! Test data fixtures

use std::sync::Arc;
use chrono::{Duration, Utc};
use volunteam::config::Settings;
use volunteam::models::event::{Position, VolunteeringEvent};
use volunteam::models::image::PickedImage;
use volunteam::models::user::{User, UserName};
use volunteam::services::{
    CacheService, HttpApiClient, HttpImageStore, ImageStore, MemoryCacheStore, ServiceFactory, VolunteamApi,
};
use volunteam::state::EventsStore;
use super::api_mock::{VolunteamMockServer, TEST_IMAGE_KEY};

pub fn test_position() -> Position {
    Position { latitude: -27.2092052, longitude: -49.6401092 }
}

pub fn test_user(id: &str, first: &str, last: &str, mobile: Option<&str>) -> User {
    User {
        id: id.to_string(),
        name: UserName { first: first.to_string(), last: last.to_string() },
        mobile: mobile.map(str::to_string),
        email: Some(format!("{}@example.com", first.to_lowercase())),
    }
}

pub fn current_user() -> User {
    test_user("user-1", "Ana", "Silva", None)
}

pub fn organizer() -> User {
    test_user("organizer-1", "Olivia", "Park", Some("(555) 123-4567"))
}

/// Event two days out, organized by [`organizer`]
pub fn test_event(id: &str, volunteers_needed: u32, volunteers_ids: &[&str]) -> VolunteeringEvent {
    VolunteeringEvent {
        id: id.to_string(),
        name: "Beach Cleanup".to_string(),
        description: "Help us clean the beach before the season starts".to_string(),
        volunteers_needed,
        volunteers_ids: volunteers_ids.iter().map(|v| v.to_string()).collect(),
        date_time: Utc::now() + Duration::days(2),
        position: test_position(),
        organizer_id: organizer().id,
        image_url: None,
    }
}

pub fn picked_image(bytes: &[u8]) -> PickedImage {
    PickedImage {
        uri: "file:///tmp/photo.jpg".to_string(),
        filename: "photo.jpg".to_string(),
        size: bytes.len() as u64,
        bytes: bytes.to_vec(),
    }
}

/// Settings pointing both remote collaborators at the mock server
pub fn test_settings(mock: &VolunteamMockServer) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = mock.base_url();
    settings.api.timeout_seconds = 5;
    settings.image_store.upload_url = mock.upload_url();
    settings.image_store.api_key = TEST_IMAGE_KEY.to_string();
    settings.image_store.timeout_seconds = 5;
    settings
}

/// Services wired to the mock server with an in-memory cache
pub fn test_services(mock: &VolunteamMockServer, events: EventsStore) -> (ServiceFactory, MemoryCacheStore) {
    let settings = test_settings(mock);
    let api: Arc<dyn VolunteamApi> = Arc::new(HttpApiClient::new(&settings.api).expect("api client"));
    let image_store: Arc<dyn ImageStore> =
        Arc::new(HttpImageStore::new(settings.image_store.clone()).expect("image store"));
    let memory = MemoryCacheStore::new();
    let cache = CacheService::new(Arc::new(memory.clone()), settings.cache.ttl_seconds);

    let services = ServiceFactory::with_backends(settings, api, image_store, cache, events);
    (services, memory)
}
