//! Image models

use serde::{Deserialize, Serialize};

/// Image shown in the create-event form
///
/// `uploaded == false` means the image is only staged locally and `url` is the
/// local URI; once the image store accepts it `url` is the hosted URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub filename: String,
    pub size: u64,
    pub url: String,
    pub uploaded: bool,
}

/// Where a picked image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Camera,
    Library,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSource::Camera => write!(f, "camera"),
            ImageSource::Library => write!(f, "library"),
        }
    }
}

/// Asset returned by the platform image picker
#[derive(Debug, Clone, PartialEq)]
pub struct PickedImage {
    pub uri: String,
    pub filename: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl PickedImage {
    /// Locally staged view of this asset
    pub fn staged(&self) -> UploadedImage {
        UploadedImage {
            filename: self.filename.clone(),
            size: self.size,
            url: self.uri.clone(),
            uploaded: false,
        }
    }
}

/// Image store's description of a hosted image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImageInfo {
    pub filename: String,
    pub url: String,
    pub size: u64,
}

impl From<UploadedImageInfo> for UploadedImage {
    fn from(info: UploadedImageInfo) -> Self {
        UploadedImage {
            filename: info.filename,
            size: info.size,
            url: info.url,
            uploaded: true,
        }
    }
}

/// Successful image store response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUploadResponse {
    pub data: ImageUploadData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageUploadData {
    pub image: ImageFile,
    pub url: String,
    pub size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageFile {
    pub filename: String,
}

/// Failed image store response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUploadErrorResponse {
    pub error: ImageUploadErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageUploadErrorBody {
    pub message: String,
}

impl From<ImageUploadResponse> for UploadedImageInfo {
    fn from(response: ImageUploadResponse) -> Self {
        UploadedImageInfo {
            filename: response.data.image.filename,
            url: response.data.url,
            size: response.data.size,
        }
    }
}
