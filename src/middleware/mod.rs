//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::{auth_middleware, require_event_creator};
pub use rate_limit::{RateLimiter, RateLimitConfig, rate_limit_middleware};
