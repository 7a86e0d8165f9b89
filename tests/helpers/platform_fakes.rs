//! In-memory platform services
//!
//! Scripted stand-ins for the device capabilities a screen talks to. Each
//! fake records what it was asked so tests can assert on it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use volunteam::models::image::{ImageSource, PickedImage};
use volunteam::platform::{ActionSheet, Alerts, ImagePicker, Platform, ShareSheet, UrlOpener};
use volunteam::utils::errors::PlatformError;

#[derive(Default)]
pub struct RecordingAlerts {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingAlerts {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Alerts for RecordingAlerts {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Answers each `choose` call with the next scripted index
#[derive(Default)]
pub struct ScriptedActionSheet {
    pub answers: Mutex<VecDeque<Option<usize>>>,
    pub shown: Mutex<Vec<Vec<String>>>,
}

impl ScriptedActionSheet {
    pub fn answer(&self, choice: Option<usize>) {
        self.answers.lock().unwrap().push_back(choice);
    }

    pub fn shown(&self) -> Vec<Vec<String>> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionSheet for ScriptedActionSheet {
    async fn choose(&self, options: &[&str], _cancel_index: usize) -> Option<usize> {
        self.shown
            .lock()
            .unwrap()
            .push(options.iter().map(|o| o.to_string()).collect());
        self.answers.lock().unwrap().pop_front().flatten()
    }
}

/// Picker with fixed permission answers and a queue of picks
pub struct FakeImagePicker {
    pub camera_allowed: Mutex<Result<bool, PlatformError>>,
    pub library_allowed: Mutex<Result<bool, PlatformError>>,
    pub picks: Mutex<VecDeque<Result<Option<PickedImage>, PlatformError>>>,
    pub launched: Mutex<Vec<ImageSource>>,
}

impl Default for FakeImagePicker {
    fn default() -> Self {
        Self {
            camera_allowed: Mutex::new(Ok(true)),
            library_allowed: Mutex::new(Ok(true)),
            picks: Mutex::new(VecDeque::new()),
            launched: Mutex::new(Vec::new()),
        }
    }
}

impl FakeImagePicker {
    pub fn deny(&self, source: ImageSource) {
        match source {
            ImageSource::Camera => *self.camera_allowed.lock().unwrap() = Ok(false),
            ImageSource::Library => *self.library_allowed.lock().unwrap() = Ok(false),
        }
    }

    pub fn queue_pick(&self, pick: Result<Option<PickedImage>, PlatformError>) {
        self.picks.lock().unwrap().push_back(pick);
    }

    pub fn launched(&self) -> Vec<ImageSource> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImagePicker for FakeImagePicker {
    async fn request_permission(&self, source: ImageSource) -> Result<bool, PlatformError> {
        match source {
            ImageSource::Camera => self.camera_allowed.lock().unwrap().clone(),
            ImageSource::Library => self.library_allowed.lock().unwrap().clone(),
        }
    }

    async fn launch(&self, source: ImageSource) -> Result<Option<PickedImage>, PlatformError> {
        self.launched.lock().unwrap().push(source);
        self.picks.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

/// Share sheet that records messages and optionally fails
#[derive(Default)]
pub struct FakeShareSheet {
    pub shared: Mutex<Vec<String>>,
    pub failure: Mutex<Option<PlatformError>>,
}

impl FakeShareSheet {
    pub fn fail_with(&self, error: PlatformError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn shared(&self) -> Vec<String> {
        self.shared.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShareSheet for FakeShareSheet {
    async fn share(&self, message: &str) -> Result<(), PlatformError> {
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.shared.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// URL opener that records every URL, failing when told to
#[derive(Default)]
pub struct RecordingUrlOpener {
    pub opened: Mutex<Vec<String>>,
    pub fail: Mutex<bool>,
}

impl RecordingUrlOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlOpener for RecordingUrlOpener {
    async fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        self.opened.lock().unwrap().push(url.to_string());
        if *self.fail.lock().unwrap() {
            return Err(PlatformError::new("No handler for URL"));
        }
        Ok(())
    }
}

/// Every fake, kept alongside the [`Platform`] built from them
#[derive(Clone, Default)]
pub struct FakePlatform {
    pub image_picker: Arc<FakeImagePicker>,
    pub action_sheet: Arc<ScriptedActionSheet>,
    pub share_sheet: Arc<FakeShareSheet>,
    pub url_opener: Arc<RecordingUrlOpener>,
    pub alerts: Arc<RecordingAlerts>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(&self) -> Platform {
        Platform {
            image_picker: self.image_picker.clone(),
            action_sheet: self.action_sheet.clone(),
            share_sheet: self.share_sheet.clone(),
            url_opener: self.url_opener.clone(),
            alerts: self.alerts.clone(),
        }
    }
}
