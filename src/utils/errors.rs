//! Error handling for Volunteam
//!
//! This module defines the main error types used throughout the client core
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Volunteam client core
#[derive(Error, Debug)]
pub enum VolunteamError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Image store error: {0}")]
    ImageStore(#[from] ImageStoreError),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
}

/// Image store specific errors
#[derive(Error, Debug)]
pub enum ImageStoreError {
    #[error("Image upload request failed: {0}")]
    RequestFailed(String),

    #[error("{message}")]
    Rejected { message: String },

    #[error("Image upload timed out")]
    Timeout,

    #[error("Invalid image store response: {0}")]
    InvalidResponse(String),

    #[error("Image is too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },
}

/// Failure reported by a platform service (share sheet, URL opener, picker)
#[derive(Error, Debug, Clone, Default)]
#[error("{}", .message.as_deref().unwrap_or("Unknown Error"))]
pub struct PlatformError {
    pub message: Option<String>,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }

    pub fn unknown() -> Self {
        Self { message: None }
    }
}

/// Result type alias for Volunteam operations
pub type Result<T> = std::result::Result<T, VolunteamError>;

/// Result type alias for image store operations
pub type ImageStoreResult<T> = std::result::Result<T, ImageStoreError>;

impl VolunteamError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            VolunteamError::Validation(_) => true,
            VolunteamError::PermissionDenied(_) => false,
            VolunteamError::Http(_) => true,
            VolunteamError::Api { status, .. } => *status >= 500 || *status == 409,
            VolunteamError::ImageStore(ImageStoreError::TooLarge { .. }) => false,
            VolunteamError::ImageStore(_) => true,
            VolunteamError::EventNotFound { .. } => false,
            VolunteamError::UserNotFound { .. } => false,
            VolunteamError::Config(_) => false,
            VolunteamError::Redis(_) => true,
            VolunteamError::Serialization(_) => false,
            VolunteamError::UrlParse(_) => false,
            VolunteamError::Io(_) => true,
            VolunteamError::Platform(_) => true,
            VolunteamError::Cancelled => false,
            VolunteamError::InvalidInput(_) => false,
            VolunteamError::InvalidStateTransition { .. } => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VolunteamError::Config(_) => ErrorSeverity::Critical,
            VolunteamError::Validation(_) => ErrorSeverity::Info,
            VolunteamError::InvalidInput(_) => ErrorSeverity::Info,
            VolunteamError::Cancelled => ErrorSeverity::Info,
            VolunteamError::PermissionDenied(_) => ErrorSeverity::Warning,
            VolunteamError::EventNotFound { .. } => ErrorSeverity::Warning,
            VolunteamError::UserNotFound { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Text suitable for an alert or inline error label
    pub fn user_message(&self) -> String {
        match self {
            VolunteamError::Validation(errors) => errors.join("\n"),
            VolunteamError::PermissionDenied(message) => message.clone(),
            VolunteamError::ImageStore(e) => e.to_string(),
            VolunteamError::Api { message, .. } => message.clone(),
            VolunteamError::Platform(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
