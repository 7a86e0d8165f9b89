//! Create-event screen
//!
//! Drives the new-event form: field edits, validation, the single optional
//! image (pick, upload, remove) and submission to the API. Every request
//! started here is tied to the screen's cancellation token; once the screen is
//! closed late responses are dropped without touching its state.

use chrono::{DateTime, NaiveTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use crate::models::event::{Position, VolunteeringEvent};
use crate::models::image::{ImageSource, PickedImage, UploadedImage};
use crate::models::user::User;
use crate::platform::Platform;
use crate::services::image_store::encode_image;
use crate::services::ServiceFactory;
use crate::state::event_form::{EventForm, EventFormState};
use crate::state::image_slot::{ImageSlot, ImageSlotState};
use crate::utils::errors::{Result, VolunteamError};
use crate::utils::helpers::{format_bytes, generate_uuid};
use crate::utils::logging::{log_api_error, log_image_upload, log_user_action};

pub const TAKE_PHOTO: &str = "Take Photo...";
pub const CHOOSE_FROM_LIBRARY: &str = "Choose from Library...";
pub const CANCEL: &str = "Cancel";
const CANCEL_INDEX: usize = 2;

pub const CAMERA_PERMISSION_DENIED: &str = "You've refused to allow this app to access your camera!";
pub const LIBRARY_PERMISSION_DENIED: &str = "You've refused to allow this app to access your photos!";

/// What happened to an image selection attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SelectImageOutcome {
    /// Menu dismissed, picker closed or nothing usable picked; state unchanged
    Cancelled,
    /// Access refused; the user was alerted and state is unchanged
    PermissionDenied(ImageSource),
    Uploaded(UploadedImage),
    /// Upload failed; the staged image stays visible with this message
    UploadFailed(String),
    /// Screen closed while the upload was in flight
    Abandoned,
}

pub struct CreateEventScreen {
    position: Position,
    current_user: User,
    services: ServiceFactory,
    platform: Platform,
    form: EventFormState,
    image: ImageSlot,
    saving_errors: Option<Vec<String>>,
    is_valid: bool,
    is_saving: bool,
    lifetime: CancellationToken,
}

impl CreateEventScreen {
    pub fn new(position: Position, current_user: User, services: ServiceFactory, platform: Platform) -> Self {
        let form = EventFormState::new(&services.settings.events, Utc::now());
        Self {
            position,
            current_user,
            services,
            platform,
            form,
            image: ImageSlot::new(),
            saving_errors: None,
            is_valid: false,
            is_saving: false,
            lifetime: CancellationToken::new(),
        }
    }

    pub fn form(&self) -> &EventForm {
        self.form.form()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.set_name(name);
    }

    pub fn set_description(&mut self, description: &str) {
        self.form.set_description(description);
    }

    pub fn set_volunteers_needed(&mut self, volunteers: u32) {
        self.form.set_volunteers_needed(volunteers);
    }

    pub fn set_date_time(&mut self, date_time: DateTime<Utc>) {
        self.form.set_date_time(date_time);
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.form.set_time(time);
    }

    /// Re-run validation, keeping the messages for inline display
    pub fn validate(&mut self) -> bool {
        let errors = self.form.validate_at(Utc::now());
        self.is_valid = errors.is_empty();
        self.saving_errors = Some(errors);
        self.is_valid
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn saving_errors(&self) -> &[String] {
        self.saving_errors.as_deref().unwrap_or(&[])
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.image()
    }

    pub fn image_state(&self) -> &ImageSlotState {
        self.image.state()
    }

    /// Human readable size of the current image
    pub fn image_size_label(&self) -> Option<String> {
        self.image
            .image()
            .filter(|image| image.size > 0)
            .map(|image| format_bytes(image.size))
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.image.error()
    }

    pub fn is_uploading(&self) -> bool {
        self.image.is_uploading()
    }

    /// Spinner flag: an upload or the event creation is in flight
    pub fn is_busy(&self) -> bool {
        self.image.is_uploading() || self.is_saving
    }

    pub fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    /// Abandon the screen; in-flight requests will not update it
    pub fn close(&self) {
        self.lifetime.cancel();
    }

    /// Ask camera-or-library, check permission, pick and upload
    pub async fn select_image(&mut self) -> SelectImageOutcome {
        self.image.clear_error();

        let options = [TAKE_PHOTO, CHOOSE_FROM_LIBRARY, CANCEL];
        let source = match self.platform.action_sheet.choose(&options, CANCEL_INDEX).await {
            Some(0) => ImageSource::Camera,
            Some(1) => ImageSource::Library,
            _ => return SelectImageOutcome::Cancelled,
        };

        let granted = match self.platform.image_picker.request_permission(source).await {
            Ok(granted) => granted,
            Err(e) => {
                warn!(source = %source, error = %e, "Permission request failed");
                false
            }
        };

        if !granted {
            let message = match source {
                ImageSource::Camera => CAMERA_PERMISSION_DENIED,
                ImageSource::Library => LIBRARY_PERMISSION_DENIED,
            };
            self.platform.alerts.alert(message);
            log_user_action(&self.current_user.id, "image_permission_denied", Some(&source.to_string()));
            return SelectImageOutcome::PermissionDenied(source);
        }

        let picked = match self.platform.image_picker.launch(source).await {
            Ok(Some(picked)) => picked,
            Ok(None) => return SelectImageOutcome::Cancelled,
            Err(e) => {
                debug!(source = %source, error = %e, "Image picker failed");
                return SelectImageOutcome::Cancelled;
            }
        };

        self.persist_image(picked).await
    }

    /// Stage a picked image and upload it
    pub async fn persist_image(&mut self, picked: PickedImage) -> SelectImageOutcome {
        if picked.bytes.is_empty() {
            warn!(filename = %picked.filename, "Picked image has no data, ignoring");
            return SelectImageOutcome::Cancelled;
        }
        if self.lifetime.is_cancelled() {
            return SelectImageOutcome::Abandoned;
        }

        self.image.pick(&picked);
        let ticket = match self.image.begin_upload() {
            Ok(ticket) => ticket,
            Err(e) => return SelectImageOutcome::UploadFailed(e.user_message()),
        };

        let encoded = encode_image(&picked.bytes);
        let store = self.services.image_store.clone();
        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => {
                debug!(filename = %picked.filename, "Screen closed during image upload");
                self.image.abandon_upload(ticket);
                return SelectImageOutcome::Abandoned;
            }
            result = store.upload_image(&encoded) => result,
        };

        match result {
            Ok(info) => {
                log_image_upload(&info.filename, info.size, true, None);
                let uploaded = UploadedImage::from(info.clone());
                self.image.complete_upload(ticket, info);
                SelectImageOutcome::Uploaded(uploaded)
            }
            Err(e) => {
                let message = format!("Image upload failed: {}", e);
                log_image_upload(&picked.filename, picked.size, false, Some(&message));
                self.image.fail_upload(ticket, message.clone());
                SelectImageOutcome::UploadFailed(message)
            }
        }
    }

    pub fn remove_image(&mut self) {
        self.image.remove();
    }

    /// Validate, build and create the event
    pub async fn submit(&mut self) -> Result<VolunteeringEvent> {
        if self.lifetime.is_cancelled() {
            return Err(VolunteamError::Cancelled);
        }
        if self.image.is_uploading() {
            return Err(VolunteamError::InvalidInput("Image upload still in progress".to_string()));
        }

        if !self.validate() {
            return Err(VolunteamError::Validation(self.saving_errors().to_vec()));
        }

        let event = self.build_event();
        let events = self.services.event_service.clone();

        self.is_saving = true;
        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => {
                self.is_saving = false;
                return Err(VolunteamError::Cancelled);
            }
            result = events.create_event(event) => result,
        };
        self.is_saving = false;

        match &result {
            Ok(event) => info!(event_id = %event.id, has_image = event.image_url.is_some(), "Event submitted"),
            Err(e) => log_api_error("volunteam", &e.to_string(), Some("create_event")),
        }
        result
    }

    fn build_event(&self) -> VolunteeringEvent {
        let form = self.form.form();
        VolunteeringEvent {
            id: generate_uuid(),
            name: form.name.clone(),
            description: form.description.clone(),
            volunteers_needed: form.volunteers_needed,
            volunteers_ids: Vec::new(),
            date_time: form.date_time,
            position: self.position,
            organizer_id: self.current_user.id.clone(),
            image_url: self.image.persisted().map(|image| image.url.clone()),
        }
    }
}
