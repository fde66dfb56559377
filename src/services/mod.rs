//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod geocoding;
pub mod media;

// Re-export commonly used services
pub use auth::{AuthService, Claims};
pub use geocoding::{GeocodingService, PlaceSuggestion};
pub use media::MediaService;

use crate::config::settings::Settings;
use crate::database::repositories::UserRepository;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub geocoding_service: GeocodingService,
    pub media_service: MediaService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: Settings,
        user_repository: UserRepository,
        redis_client: redis::Client,
    ) -> Result<Self> {
        let auth_service = AuthService::new(user_repository, settings.clone());
        let geocoding_service = GeocodingService::new(redis_client, settings.clone())?;
        let media_service = MediaService::new(settings)?;

        Ok(Self {
            auth_service,
            geocoding_service,
            media_service,
        })
    }
}
