//! Error handling for Ticketry
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy. The `IntoResponse` impl
//! is the single place where errors become HTTP status codes and the
//! `{"error": ...}` JSON body the API contract promises.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for the Ticketry application
#[derive(Error, Debug)]
pub enum TicketryError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Geocoding API error: {0}")]
    Geocoding(#[from] GeocodingError),

    #[error("Media upload error: {0}")]
    Media(#[from] MediaError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Resource not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Geocoding API specific errors
#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    #[error("Geocoding API timeout")]
    Timeout,

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),

    #[error("Geocoding service unavailable")]
    ServiceUnavailable,
}

/// Image hosting API specific errors
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid media response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),
}

/// Result type alias for Ticketry operations
pub type Result<T> = std::result::Result<T, TicketryError>;

impl From<sqlx::Error> for TicketryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => TicketryError::NotFound,
            _ => TicketryError::Database(err),
        }
    }
}

impl From<config::ConfigError> for TicketryError {
    fn from(err: config::ConfigError) -> Self {
        TicketryError::Config(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for TicketryError {
    fn from(err: argon2::password_hash::Error) -> Self {
        TicketryError::PasswordHash(err.to_string())
    }
}

impl TicketryError {
    /// Map an error to the HTTP status code and client-facing message.
    ///
    /// Internal failures are collapsed into a generic message; the real
    /// cause is logged server-side in `into_response`.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            TicketryError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            TicketryError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            TicketryError::Jwt(_) => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            TicketryError::PermissionDenied(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            TicketryError::UserNotFound { .. }
            | TicketryError::EventNotFound { .. }
            | TicketryError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            TicketryError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            TicketryError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded".to_string())
            }
            TicketryError::ServiceUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service unavailable".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for TicketryError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = TicketryError::Validation("Missing required fields".to_string());
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Missing required fields");
    }

    #[test]
    fn test_authentication_maps_to_unauthorized() {
        let err = TicketryError::Authentication("Invalid email or password".to_string());
        let (status, _) = err.status_and_message();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_row_not_found_becomes_not_found() {
        let err = TicketryError::from(sqlx::Error::RowNotFound);
        let (status, _) = err.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = TicketryError::Config("secret path".to_string());
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }
}
