//! Event-details screen
//!
//! Shows one event from the shared collection with its organizer, derives the
//! viewer's volunteering status and performs the actions offered for it:
//! joining, sharing, contacting the organizer and getting directions.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use crate::models::event::{VolunteeringEvent, VolunteeringStatus};
use crate::models::user::User;
use crate::platform::Platform;
use crate::services::ServiceFactory;
use crate::state::status::{resolve, VolunteeringInfo};
use crate::utils::errors::{Result, VolunteamError};
use crate::utils::helpers::{maps_url, share_message, sms_uri, tel_uri};
use crate::utils::logging::{log_api_error, log_user_action};

/// Buttons the details view offers, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Share,
    Call,
    Text,
    Volunteer,
    Directions,
}

pub struct EventDetailsScreen {
    event_id: String,
    current_user: User,
    services: ServiceFactory,
    platform: Platform,
    current_event: Option<VolunteeringEvent>,
    organizer: Option<User>,
    status: Option<VolunteeringStatus>,
    join_error: Option<String>,
    lifetime: CancellationToken,
}

impl EventDetailsScreen {
    pub fn new(event_id: impl Into<String>, current_user: User, services: ServiceFactory, platform: Platform) -> Self {
        Self {
            event_id: event_id.into(),
            current_user,
            services,
            platform,
            current_event: None,
            organizer: None,
            status: None,
            join_error: None,
            lifetime: CancellationToken::new(),
        }
    }

    pub fn event(&self) -> Option<&VolunteeringEvent> {
        self.current_event.as_ref()
    }

    pub fn organizer(&self) -> Option<&User> {
        self.organizer.as_ref()
    }

    pub fn status(&self) -> Option<VolunteeringStatus> {
        self.status
    }

    pub fn organizer_label(&self) -> Option<String> {
        self.organizer
            .as_ref()
            .map(|organizer| format!("organized by {}", organizer.full_name()))
    }

    pub fn volunteering_info(&self) -> Option<VolunteeringInfo> {
        self.current_event
            .as_ref()
            .map(|event| VolunteeringInfo::for_user(event, &self.current_user))
    }

    pub fn join_error(&self) -> Option<&str> {
        self.join_error.as_deref()
    }

    /// A failed join can be retried while the user is still off the roster
    pub fn can_retry_join(&self) -> bool {
        self.join_error.is_some() && self.status == Some(VolunteeringStatus::NotApplied)
    }

    pub fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    /// Abandon the screen; in-flight requests will not update it
    pub fn close(&self) {
        self.lifetime.cancel();
    }

    /// Look the event up in the shared collection
    ///
    /// A missing event leaves the screen empty.
    pub async fn load(&mut self) -> Option<&VolunteeringEvent> {
        let event = self.services.events().find_by_id(&self.event_id).await;
        if event.is_none() {
            debug!(event_id = %self.event_id, "Event not in local collection");
        }
        self.set_event(event);
        self.current_event.as_ref()
    }

    /// Fetch the organizer, cached copy first; failures only get logged
    pub async fn load_organizer(&mut self) -> Option<&User> {
        let organizer_id = self.current_event.as_ref()?.organizer_id.clone();
        let users = self.services.user_service.clone();

        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => return None,
            result = users.get_user_details(&organizer_id) => result,
        };

        match result {
            Ok(fetched) => {
                debug!(organizer_id = %organizer_id, source = ?fetched.source, "Organizer loaded");
                self.organizer = Some(fetched.value);
            }
            Err(e) => {
                warn!(organizer_id = %organizer_id, error = %e, "Failed to load organizer");
            }
        }
        self.organizer.as_ref()
    }

    /// Add the current user to the event's volunteers
    ///
    /// On failure the event is left as it was and the message is kept for a
    /// retry prompt.
    pub async fn join(&mut self) -> Result<VolunteeringStatus> {
        let event = self
            .current_event
            .clone()
            .ok_or_else(|| VolunteamError::EventNotFound { event_id: self.event_id.clone() })?;
        let events = self.services.event_service.clone();
        let user_id = self.current_user.id.clone();

        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => return Err(VolunteamError::Cancelled),
            result = events.join(&event, &user_id) => result,
        };

        match result {
            Ok(updated) => {
                let status = resolve(&updated, &self.current_user);
                self.join_error = None;
                self.set_event(Some(updated));
                Ok(status)
            }
            Err(e) => {
                log_api_error("volunteam", &e.to_string(), Some("join_event"));
                self.join_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Hand the share message to the native share sheet, alerting on failure
    pub async fn share(&self) -> Result<String> {
        let event = self
            .current_event
            .as_ref()
            .ok_or_else(|| VolunteamError::EventNotFound { event_id: self.event_id.clone() })?;
        let message = share_message(event);

        match self.platform.share_sheet.share(&message).await {
            Ok(()) => {
                log_user_action(&self.current_user.id, "share_event", Some(&event.id));
                Ok(message)
            }
            Err(e) => {
                self.platform.alerts.alert(&e.to_string());
                Err(e.into())
            }
        }
    }

    /// Phone the organizer; false when there is no number to call
    pub async fn call(&self) -> bool {
        match self.organizer.as_ref().and_then(User::contact_number) {
            Some(phone) => {
                self.open_best_effort(&tel_uri(phone)).await;
                true
            }
            None => false,
        }
    }

    /// Text the organizer; false when there is no number to text
    pub async fn text(&self) -> bool {
        match self.organizer.as_ref().and_then(User::contact_number) {
            Some(phone) => {
                self.open_best_effort(&sms_uri(phone)).await;
                true
            }
            None => false,
        }
    }

    /// Open directions to the event in the maps app
    pub async fn directions(&self) -> bool {
        match self.current_event.as_ref() {
            Some(event) => {
                self.open_best_effort(&maps_url(&event.position)).await;
                true
            }
            None => false,
        }
    }

    /// Actions for the current status; nothing but directions once the event is full
    pub fn actions(&self) -> Vec<DetailAction> {
        let Some(status) = self.status else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        match status {
            VolunteeringStatus::Full => {}
            VolunteeringStatus::Applied => {
                actions.push(DetailAction::Share);
                if self.organizer.as_ref().and_then(User::contact_number).is_some() {
                    actions.push(DetailAction::Call);
                    actions.push(DetailAction::Text);
                }
            }
            VolunteeringStatus::NotApplied => {
                actions.push(DetailAction::Share);
                actions.push(DetailAction::Volunteer);
            }
        }
        actions.push(DetailAction::Directions);
        actions
    }

    fn set_event(&mut self, event: Option<VolunteeringEvent>) {
        self.status = event.as_ref().map(|e| resolve(e, &self.current_user));
        self.current_event = event;
    }

    async fn open_best_effort(&self, url: &str) {
        if let Err(e) = self.platform.url_opener.open_url(url).await {
            debug!(url = %url, error = %e, "URL could not be opened");
        }
    }
}
