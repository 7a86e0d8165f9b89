//! Screen handlers module
//!
//! This module contains the orchestrators behind the create-event and
//! event-details screens

pub mod create_event;
pub mod event_details;

pub use create_event::{CreateEventScreen, SelectImageOutcome};
pub use event_details::{DetailAction, EventDetailsScreen};
