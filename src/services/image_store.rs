//! Image store service implementation
//!
//! Uploads picked images to the remote image host and returns the durable URL
//! the event will reference.

use std::time::Duration;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use tracing::debug;
use crate::config::settings::ImageStoreConfig;
use crate::models::image::{ImageUploadErrorResponse, ImageUploadResponse, UploadedImageInfo};
use crate::utils::errors::{ImageStoreError, ImageStoreResult, Result, VolunteamError};

/// Remote host for event images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload base64-encoded image data
    async fn upload_image(&self, base64_image: &str) -> ImageStoreResult<UploadedImageInfo>;
}

/// Encode raw image bytes for [`ImageStore::upload_image`]
pub fn encode_image(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// HTTP image store speaking the imgbb-style upload protocol
#[derive(Clone, Debug)]
pub struct HttpImageStore {
    client: Client,
    config: ImageStoreConfig,
}

impl HttpImageStore {
    /// Create a new HttpImageStore instance
    pub fn new(config: ImageStoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(VolunteamError::Http)?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload_image(&self, base64_image: &str) -> ImageStoreResult<UploadedImageInfo> {
        // base64 inflates by 4/3
        let decoded_size = (base64_image.len() as u64 / 4) * 3;
        if decoded_size > self.config.max_upload_bytes {
            return Err(ImageStoreError::TooLarge {
                size: decoded_size,
                limit: self.config.max_upload_bytes,
            });
        }

        debug!(encoded_len = base64_image.len(), url = %self.config.upload_url, "Uploading image");

        let response = self
            .client
            .post(&self.config.upload_url)
            .query(&[("key", self.config.api_key.as_str())])
            .form(&[("image", base64_image)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageStoreError::Timeout
                } else {
                    ImageStoreError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ImageStoreError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ImageUploadErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(ImageStoreError::Rejected { message });
        }

        let uploaded: ImageUploadResponse = serde_json::from_str(&body)
            .map_err(|e| ImageStoreError::InvalidResponse(e.to_string()))?;

        Ok(uploaded.into())
    }
}
