//! Event service implementation
//!
//! Keeps the shared events collection in step with the remote API: initial
//! load, event creation and joining an event's volunteer roster.

use std::sync::Arc;
use tracing::{debug, info};
use crate::models::event::VolunteeringEvent;
use crate::services::api::VolunteamApi;
use crate::state::events::EventsStore;
use crate::utils::errors::Result;
use crate::utils::logging::log_event_action;

#[derive(Clone)]
pub struct EventService {
    api: Arc<dyn VolunteamApi>,
    store: EventsStore,
}

impl EventService {
    pub fn new(api: Arc<dyn VolunteamApi>, store: EventsStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &EventsStore {
        &self.store
    }

    /// Reload the shared collection from the API
    pub async fn refresh(&self) -> Result<usize> {
        let events = self.api.list_events().await?;
        let count = events.len();
        self.store.set_all(events).await;
        info!(count = count, "Events refreshed");
        Ok(count)
    }

    /// Create the event remotely, then add it to the shared collection
    pub async fn create_event(&self, event: VolunteeringEvent) -> Result<VolunteeringEvent> {
        self.api.create_event(&event).await?;
        log_event_action(&event.id, "create", &event.organizer_id, Some(&event.name));
        self.store.push(event.clone()).await;
        Ok(event)
    }

    /// Add `user_id` to the roster; the server's representation replaces ours
    pub async fn join(&self, event: &VolunteeringEvent, user_id: &str) -> Result<VolunteeringEvent> {
        debug!(event_id = %event.id, user_id = %user_id, "Joining event");
        let updated = self.api.update_volunteers(event, user_id).await?;
        log_event_action(&updated.id, "join", user_id, None);
        self.store.upsert(updated.clone()).await;
        Ok(updated)
    }
}
