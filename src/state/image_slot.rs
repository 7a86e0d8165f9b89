//! Image slot state machine
//!
//! The create-event form holds at most one image. A picked image is staged
//! locally, uploaded to the image store and, on success, replaced by the hosted
//! version. A failed upload keeps the staged image visible alongside the error.
//!
//! ```text
//! Empty --pick--> Picked --complete_upload--> Persisted
//!                   |  ^
//!       fail_upload |  | clear_error
//!                   v  |
//!                  Error
//! any --remove--> Empty        any --pick--> Picked (replaces)
//! ```

use tracing::debug;
use crate::models::image::{PickedImage, UploadedImage, UploadedImageInfo};
use crate::utils::errors::{Result, VolunteamError};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageSlotState {
    #[default]
    Empty,
    Picked { image: UploadedImage },
    Persisted { image: UploadedImage },
    Error { image: UploadedImage, message: String },
}

impl ImageSlotState {
    fn name(&self) -> &'static str {
        match self {
            ImageSlotState::Empty => "empty",
            ImageSlotState::Picked { .. } => "picked",
            ImageSlotState::Persisted { .. } => "persisted",
            ImageSlotState::Error { .. } => "error",
        }
    }
}

/// Identifies the upload started for one particular pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct ImageSlot {
    state: ImageSlotState,
    generation: u64,
    uploading: bool,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ImageSlotState {
        &self.state
    }

    /// True exactly while an upload request is in flight
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// The image to display, staged or hosted
    pub fn image(&self) -> Option<&UploadedImage> {
        match &self.state {
            ImageSlotState::Empty => None,
            ImageSlotState::Picked { image }
            | ImageSlotState::Persisted { image }
            | ImageSlotState::Error { image, .. } => Some(image),
        }
    }

    /// Hosted image, only once the upload succeeded
    pub fn persisted(&self) -> Option<&UploadedImage> {
        match &self.state {
            ImageSlotState::Persisted { image } => Some(image),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ImageSlotState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Stage a newly picked image, replacing whatever was there
    pub fn pick(&mut self, picked: &PickedImage) {
        self.generation += 1;
        self.uploading = false;
        debug!(filename = %picked.filename, size = picked.size, from = self.state.name(), "Image staged");
        self.state = ImageSlotState::Picked { image: picked.staged() };
    }

    /// Mark the staged image as being uploaded
    pub fn begin_upload(&mut self) -> Result<UploadTicket> {
        match self.state {
            ImageSlotState::Picked { .. } if !self.uploading => {
                self.uploading = true;
                Ok(UploadTicket { generation: self.generation })
            }
            _ => Err(VolunteamError::InvalidStateTransition {
                from: self.state.name().to_string(),
                to: "uploading".to_string(),
            }),
        }
    }

    /// Apply a successful upload; returns false if the ticket is stale
    pub fn complete_upload(&mut self, ticket: UploadTicket, info: UploadedImageInfo) -> bool {
        if !self.is_current(ticket) {
            debug!(filename = %info.filename, "Ignoring upload result for a replaced image");
            return false;
        }
        self.uploading = false;
        self.state = ImageSlotState::Persisted { image: info.into() };
        true
    }

    /// Apply a failed upload; returns false if the ticket is stale
    pub fn fail_upload(&mut self, ticket: UploadTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.uploading = false;
        let image = match std::mem::take(&mut self.state) {
            ImageSlotState::Picked { image } | ImageSlotState::Error { image, .. } => image,
            other => {
                self.state = other;
                return false;
            }
        };
        self.state = ImageSlotState::Error { image, message: message.into() };
        true
    }

    /// Give up on an in-flight upload, keeping the staged image
    pub fn abandon_upload(&mut self, ticket: UploadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.uploading = false;
        true
    }

    /// Drop the error message, keeping the staged image
    pub fn clear_error(&mut self) {
        if let ImageSlotState::Error { image, .. } = &self.state {
            let image = image.clone();
            self.state = ImageSlotState::Picked { image };
        }
    }

    /// Empty the slot; any in-flight upload result will be ignored
    pub fn remove(&mut self) {
        self.generation += 1;
        self.uploading = false;
        self.state = ImageSlotState::Empty;
    }

    fn is_current(&self, ticket: UploadTicket) -> bool {
        self.uploading && ticket.generation == self.generation
    }
}
