//! Rate limiting middleware
//!
//! This module provides rate limiting functionality to prevent abuse
//! and ensure fair usage of the API.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::state::AppState;
use crate::utils::errors::{Result, TicketryError};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window_duration: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst_allowance: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window_duration: Duration::from_secs(60),
            burst_allowance: 10,
        }
    }
}

/// Rate limit entry for tracking client requests
#[derive(Debug, Clone)]
struct RateLimitEntry {
    requests: Vec<Instant>,
    burst_used: u32,
    last_reset: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            burst_used: 0,
            last_reset: Instant::now(),
        }
    }

    /// Clean up old requests outside the window
    fn cleanup(&mut self, window_duration: Duration) {
        let cutoff = Instant::now() - window_duration;
        self.requests.retain(|&time| time > cutoff);

        // Reset burst if enough time has passed
        if self.last_reset.elapsed() > window_duration {
            self.burst_used = 0;
            self.last_reset = Instant::now();
        }
    }

    /// Check if request is allowed
    fn is_allowed(&mut self, config: &RateLimitConfig) -> bool {
        self.cleanup(config.window_duration);

        let current_requests = self.requests.len() as u32;

        // Check if within normal limits
        if current_requests < config.max_requests {
            return true;
        }

        // Check if burst allowance is available
        if self.burst_used < config.burst_allowance {
            self.burst_used += 1;
            return true;
        }

        false
    }

    /// Record a new request
    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }
}

/// Sliding-window rate limiter keyed by client identity
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

impl RateLimiter {
    /// Create a new RateLimiter instance
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a client is rate limited
    pub fn check_rate_limit(&self, client_key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(client_key.to_string())
            .or_insert_with(RateLimitEntry::new);

        if entry.is_allowed(&self.config) {
            entry.record_request();
            debug!(client = client_key, "Rate limit check passed");
            Ok(())
        } else {
            warn!(client = client_key, "Rate limit exceeded");
            Err(TicketryError::RateLimitExceeded)
        }
    }

    /// Cleanup old entries (should be called periodically)
    pub fn cleanup_old_entries(&self) {
        let mut entries = self.entries.lock().unwrap();
        let cutoff = Instant::now() - self.config.window_duration * 2;

        entries.retain(|_, entry| {
            entry.requests.iter().any(|&time| time > cutoff)
        });

        debug!(remaining_entries = entries.len(), "Cleaned up old rate limit entries");
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

/// Identify the client for rate limiting: the forwarded address when
/// behind a proxy, otherwise a shared bucket.
fn client_key(req: &Request) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum middleware applying the rate limiter to every request
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response> {
    state.rate_limiter.check_rate_limit(&client_key(&req))?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_basic() {
        let config = RateLimitConfig {
            max_requests: 3,
            window_duration: Duration::from_secs(60),
            burst_allowance: 1,
        };

        let limiter = RateLimiter::new(config);

        // First 3 requests should pass
        assert!(limiter.check_rate_limit("10.0.0.1").is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").is_ok());

        // 4th request should use burst allowance
        assert!(limiter.check_rate_limit("10.0.0.1").is_ok());

        // 5th request should fail
        assert!(limiter.check_rate_limit("10.0.0.1").is_err());
    }

    #[test]
    fn test_clients_are_limited_independently() {
        let config = RateLimitConfig {
            max_requests: 1,
            window_duration: Duration::from_secs(60),
            burst_allowance: 0,
        };

        let limiter = RateLimiter::new(config);

        assert!(limiter.check_rate_limit("10.0.0.1").is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").is_err());

        // A different client has its own window
        assert!(limiter.check_rate_limit("10.0.0.2").is_ok());
    }

    #[test]
    fn test_cleanup_keeps_recent_entries() {
        let limiter = RateLimiter::default();

        limiter.check_rate_limit("10.0.0.1").unwrap();
        limiter.check_rate_limit("10.0.0.1").unwrap();

        limiter.cleanup_old_entries();

        let entries = limiter.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
    }
}
