//! Shared events collection
//!
//! A cloneable handle on the ordered list of events every screen reads from.
//! Screens receive it explicitly instead of looking it up from ambient state.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use crate::models::event::VolunteeringEvent;

#[derive(Debug, Clone, Default)]
pub struct EventsStore {
    events: Arc<RwLock<Vec<VolunteeringEvent>>>,
}

impl EventsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<VolunteeringEvent>) -> Self {
        Self { events: Arc::new(RwLock::new(events)) }
    }

    pub async fn find_by_id(&self, event_id: &str) -> Option<VolunteeringEvent> {
        self.events.read().await.iter().find(|e| e.id == event_id).cloned()
    }

    pub async fn all(&self) -> Vec<VolunteeringEvent> {
        self.events.read().await.clone()
    }

    /// Events starting at or after `now`, soonest first
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Vec<VolunteeringEvent> {
        let mut upcoming: Vec<_> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.date_time >= now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|e| e.date_time);
        upcoming
    }

    pub async fn set_all(&self, events: Vec<VolunteeringEvent>) {
        debug!(count = events.len(), "Replacing events collection");
        *self.events.write().await = events;
    }

    pub async fn push(&self, event: VolunteeringEvent) {
        self.events.write().await.push(event);
    }

    /// Replace the event with the same id, or append it
    pub async fn upsert(&self, event: VolunteeringEvent) {
        let mut events = self.events.write().await;
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}
