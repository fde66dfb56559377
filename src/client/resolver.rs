//! Debounced location resolver
//!
//! Free-text location input resolves to coordinates only after a quiet
//! period, and a newer query supersedes any pending one, so at most the
//! latest lookup ever fires. Queries below the minimum length are ignored
//! outright.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::settings::GeocodingConfig;
use crate::services::geocoding::{GeocodingService, PlaceSuggestion};
use crate::utils::errors::Result;

/// Outcome of a resolver query
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The query survived the quiet period and matched a place
    Resolved(PlaceSuggestion),
    /// The query survived the quiet period but matched nothing
    NoMatch,
    /// A newer query arrived before the quiet period elapsed
    Superseded,
    /// The query was below the minimum length and was not looked up
    TooShort,
}

/// Debounced, cancellable free-text-to-coordinates lookup
#[derive(Debug, Clone)]
pub struct LocationResolver {
    geocoding: GeocodingService,
    debounce: Duration,
    min_query_length: usize,
    generation: Arc<AtomicU64>,
}

impl LocationResolver {
    pub fn new(geocoding: GeocodingService, config: &GeocodingConfig) -> Self {
        Self {
            geocoding,
            debounce: Duration::from_millis(config.debounce_ms),
            min_query_length: config.min_query_length,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submit a query. Each call invalidates any pending lookup; only the
    /// call that is still the latest after the quiet period queries the
    /// geocoding service.
    pub async fn submit_query(&self, query: &str) -> Result<Resolution> {
        if query.chars().count() < self.min_query_length {
            return Ok(Resolution::TooShort);
        }

        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.debounce).await;

        if self.generation.load(Ordering::SeqCst) != token {
            return Ok(Resolution::Superseded);
        }

        match self.geocoding.resolve(query).await? {
            Some(suggestion) => Ok(Resolution::Resolved(suggestion)),
            None => Ok(Resolution::NoMatch),
        }
    }
}
