//! Platform service seams
//!
//! Device capabilities the screens hand off to: the image picker with its
//! permission prompts, the confirm/cancel action sheet, the native share sheet,
//! the URL opener for `tel:`/`sms:`/maps links and blocking alerts.

use std::sync::Arc;
use async_trait::async_trait;
use crate::models::image::{ImageSource, PickedImage};
use crate::utils::errors::PlatformError;

#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Ask for camera or photo-library access; `false` means refused
    async fn request_permission(&self, source: ImageSource) -> Result<bool, PlatformError>;

    /// Open the camera or library; `None` when the user backs out
    async fn launch(&self, source: ImageSource) -> Result<Option<PickedImage>, PlatformError>;
}

#[async_trait]
pub trait ActionSheet: Send + Sync {
    /// Index of the chosen option, `None` if dismissed
    async fn choose(&self, options: &[&str], cancel_index: usize) -> Option<usize>;
}

#[async_trait]
pub trait ShareSheet: Send + Sync {
    async fn share(&self, message: &str) -> Result<(), PlatformError>;
}

#[async_trait]
pub trait UrlOpener: Send + Sync {
    async fn open_url(&self, url: &str) -> Result<(), PlatformError>;
}

pub trait Alerts: Send + Sync {
    fn alert(&self, message: &str);
}

/// Handles on every platform service a screen may use
#[derive(Clone)]
pub struct Platform {
    pub image_picker: Arc<dyn ImagePicker>,
    pub action_sheet: Arc<dyn ActionSheet>,
    pub share_sheet: Arc<dyn ShareSheet>,
    pub url_opener: Arc<dyn UrlOpener>,
    pub alerts: Arc<dyn Alerts>,
}
