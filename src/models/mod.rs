//! Data models module
//!
//! This module contains the data structures exchanged with the remote API,
//! the image store and the platform picker

pub mod user;
pub mod event;
pub mod image;

// Re-export commonly used models
pub use user::{User, UserName};
pub use event::{Position, VolunteeringEvent, VolunteeringStatus, UpdateVolunteersRequest};
pub use image::{UploadedImage, UploadedImageInfo, PickedImage, ImageSource};
