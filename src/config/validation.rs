//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{TicketryError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_auth_config(&settings.auth)?;
    validate_geocoding_config(&settings.geocoding)?;
    validate_media_config(&settings.media)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(TicketryError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(TicketryError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TicketryError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(TicketryError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(TicketryError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TicketryError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(TicketryError::Config(
            "JWT secret is required".to_string()
        ));
    }

    if config.token_ttl_hours <= 0 {
        return Err(TicketryError::Config(
            "Token TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate geocoding configuration
fn validate_geocoding_config(config: &super::GeocodingConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(TicketryError::Config(
            "Geocoding API URL is required".to_string()
        ));
    }

    url::Url::parse(&config.api_url)
        .map_err(|e| TicketryError::Config(format!("Invalid geocoding API URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(TicketryError::Config(
            "Geocoding timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate media upload configuration
fn validate_media_config(config: &super::MediaConfig) -> Result<()> {
    if config.upload_url.is_empty() {
        return Err(TicketryError::Config(
            "Media upload URL is required".to_string()
        ));
    }

    url::Url::parse(&config.upload_url)
        .map_err(|e| TicketryError::Config(format!("Invalid media upload URL: {}", e)))?;

    if config.upload_preset.is_empty() {
        return Err(TicketryError::Config(
            "Media upload preset is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(TicketryError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(TicketryError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
