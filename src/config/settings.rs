//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub geocoding: GeocodingConfig,
    pub media: MediaConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Geocoding (place search) API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub debounce_ms: u64,
    pub min_query_length: usize,
}

/// Image hosting API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    pub upload_url: String,
    pub upload_preset: String,
    pub folder: String,
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("TICKETRY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::TicketryError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/ticketry".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "ticketry:".to_string(),
                ttl_seconds: 3600,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                token_ttl_hours: 24 * 7,
            },
            geocoding: GeocodingConfig {
                api_url: "https://photon.komoot.io".to_string(),
                timeout_seconds: 5,
                debounce_ms: 600,
                min_query_length: 4,
            },
            media: MediaConfig {
                upload_url: "https://api.cloudinary.com/v1_1/ticketry/image/upload".to_string(),
                upload_preset: "ticketry".to_string(),
                folder: "events".to_string(),
                timeout_seconds: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/ticketry".to_string(),
            },
        }
    }
}
