//! Configuration validation module
//!
//! This module provides validation functions for client configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{VolunteamError, Result};
use crate::state::event_form::MIN_DESCRIPTION_LENGTH;
use super::{CacheBackend, Settings};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_image_store_config(&settings.image_store)?;
    validate_cache_config(&settings.cache)?;
    validate_events_config(&settings.events)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_url(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(VolunteamError::Config(format!("{} is required", name)));
    }

    url::Url::parse(value)
        .map_err(|e| VolunteamError::Config(format!("{} is not a valid URL: {}", name, e)))?;

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    validate_url("API base URL", &config.base_url)?;

    if config.timeout_seconds == 0 {
        return Err(VolunteamError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(VolunteamError::Config(
            "User agent is required".to_string()
        ));
    }

    Ok(())
}

/// Validate image store configuration
fn validate_image_store_config(config: &super::ImageStoreConfig) -> Result<()> {
    validate_url("Image store upload URL", &config.upload_url)?;

    if config.timeout_seconds == 0 {
        return Err(VolunteamError::Config(
            "Image store timeout must be greater than 0".to_string()
        ));
    }

    if config.max_upload_bytes == 0 {
        return Err(VolunteamError::Config(
            "Max upload size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate cache configuration
fn validate_cache_config(config: &super::CacheConfig) -> Result<()> {
    if config.backend == CacheBackend::Redis {
        match config.redis_url.as_deref() {
            Some(redis_url) => validate_url("Redis URL", redis_url)?,
            None => {
                return Err(VolunteamError::Config(
                    "Redis URL is required for the redis cache backend".to_string()
                ));
            }
        }
    }

    if config.ttl_seconds == 0 {
        return Err(VolunteamError::Config(
            "Cache TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate event creation rules
fn validate_events_config(config: &super::EventsConfig) -> Result<()> {
    if config.min_lead_time_minutes < 0 {
        return Err(VolunteamError::Config(
            "Minimum lead time cannot be negative".to_string()
        ));
    }

    if config.description_max_length < MIN_DESCRIPTION_LENGTH {
        return Err(VolunteamError::Config(format!(
            "Description max length must be at least {}",
            MIN_DESCRIPTION_LENGTH
        )));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(VolunteamError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(VolunteamError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if matches!(config.file_path.as_deref(), Some(path) if path.trim().is_empty()) {
        return Err(VolunteamError::Config(
            "Log file path cannot be blank".to_string()
        ));
    }

    Ok(())
}
