//! State management module
//!
//! This module contains the shared events collection and the per-screen state
//! of the create-event and event-details flows.

pub mod events;
pub mod event_form;
pub mod image_slot;
pub mod status;

pub use events::EventsStore;
pub use event_form::{EventForm, EventFormState};
pub use image_slot::{ImageSlot, ImageSlotState, UploadTicket};
pub use status::{resolve, VolunteeringInfo};
