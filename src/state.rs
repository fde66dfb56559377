//! Shared application state for the HTTP server

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::middleware::rate_limit::RateLimiter;
use crate::services::ServiceFactory;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseService,
    pub services: ServiceFactory,
    pub settings: Settings,
    pub rate_limiter: RateLimiter,
}
