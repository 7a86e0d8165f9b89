//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use serde::{Deserialize, Serialize};

/// Main client configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub image_store: ImageStoreConfig,
    pub cache: CacheConfig,
    pub events: EventsConfig,
    pub logging: LoggingConfig,
}

/// Volunteam REST API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Remote image store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageStoreConfig {
    pub upload_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub max_upload_bytes: u64,
}

/// Cache backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    Redis,
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: Option<String>,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Event creation rules
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
    pub min_lead_time_minutes: i64,
    pub description_max_length: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from defaults, an optional `config` file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("VOLUNTEAM")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::VolunteamError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3333".to_string(),
                timeout_seconds: 15,
                user_agent: "Volunteam-App/1.0".to_string(),
            },
            image_store: ImageStoreConfig {
                upload_url: "https://api.imgbb.com/1/upload".to_string(),
                api_key: String::new(),
                timeout_seconds: 60,
                max_upload_bytes: 32 * 1024 * 1024,
            },
            cache: CacheConfig {
                backend: CacheBackend::Memory,
                redis_url: None,
                prefix: "volunteam:".to_string(),
                ttl_seconds: 86400,
            },
            events: EventsConfig {
                min_lead_time_minutes: 60,
                description_max_length: 300,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
