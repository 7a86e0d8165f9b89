//! Volunteam client core
//!
//! Client-side logic of the Volunteam volunteering-event app: creating events
//! with an optional uploaded image, showing event details and joining events
//! against the remote API. Rendering and device capabilities are reached
//! through the traits in [`platform`].

pub mod config;
pub mod handlers;
pub mod models;
pub mod platform;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{VolunteamError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::EventsStore;
pub use handlers::{CreateEventScreen, EventDetailsScreen};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
