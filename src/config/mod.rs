//! Configuration management module
//!
//! This module handles loading and validation of client configuration
//! from configuration files and environment variables.

pub mod settings;
pub mod validation;

pub use settings::{Settings, ApiConfig, ImageStoreConfig, CacheBackend, CacheConfig, EventsConfig, LoggingConfig};
