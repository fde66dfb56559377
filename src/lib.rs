//! Ticketry
//!
//! An event discovery and ticketing marketplace backend. This library
//! provides the HTTP API (event listing and creation, bookmarks, accounts),
//! the persistence layer, external service integrations (geocoding, image
//! hosting), and a typed client with the composer/resolver/catalog
//! workflows used by consumer front ends.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod client;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{TicketryError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
