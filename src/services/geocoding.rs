//! Geocoding service implementation
//!
//! This service handles place-search API integration for free-text
//! location lookup, including HTTP client setup, response parsing,
//! result caching, and error handling. The upstream API is Photon-style:
//! `GET {base}/api/?q={query}&limit={n}` returning GeoJSON features with
//! `[longitude, latitude]` coordinate pairs.

use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use redis::AsyncCommands;
use crate::config::settings::Settings;
use crate::utils::errors::{TicketryError, GeocodingError, Result};

/// Place-search API response structure
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSearchResponse {
    pub features: Vec<PlaceFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceFeature {
    pub properties: PlaceProperties,
    pub geometry: PlaceGeometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceProperties {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceGeometry {
    /// `[longitude, latitude]`, as the API emits it
    pub coordinates: Vec<f64>,
}

/// A parsed place suggestion with coordinates in (latitude, longitude)
/// order, ready for the composer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceSuggestion {
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceSuggestion {
    /// Display string in the "name, city, country" shape shown to users
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.clone()];
        if let Some(ref city) = self.city {
            parts.push(city.clone());
        }
        if let Some(ref country) = self.country {
            parts.push(country.clone());
        }
        parts.join(", ")
    }
}

/// Cached lookup result with timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedLookup {
    suggestions: Vec<PlaceSuggestion>,
    checked_at: chrono::DateTime<chrono::Utc>,
}

/// Geocoding service for free-text location lookup
#[derive(Debug, Clone)]
pub struct GeocodingService {
    client: Client,
    redis_client: redis::Client,
    settings: Settings,
}

impl GeocodingService {
    /// Create a new GeocodingService instance
    pub fn new(redis_client: redis::Client, settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.geocoding.timeout_seconds))
            .user_agent("Ticketry/1.0")
            .build()
            .map_err(TicketryError::Http)?;

        Ok(Self {
            client,
            redis_client,
            settings,
        })
    }

    /// Search for places matching a free-text query
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<PlaceSuggestion>> {
        debug!(query = %query, limit = limit, "Searching places");

        if let Some(cached) = self.get_cached(query, limit).await {
            debug!(query = %query, "Found cached place lookup");
            return Ok(cached.suggestions);
        }

        let suggestions = self.make_search_request(query, limit).await?;
        self.cache_result(query, limit, &suggestions).await;

        Ok(suggestions)
    }

    /// Resolve a free-text location to coordinates: the first match wins.
    /// Returns `None` when the API has no match for the query.
    pub async fn resolve(&self, query: &str) -> Result<Option<PlaceSuggestion>> {
        let suggestions = self.search(query, 1).await?;
        Ok(suggestions.into_iter().next())
    }

    /// Get cached lookup from Redis. Cache failures fall back to the live
    /// API rather than failing the lookup.
    async fn get_cached(&self, query: &str, limit: u32) -> Option<CachedLookup> {
        let mut conn = match self.redis_client.get_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "Redis unavailable, skipping geocode cache");
                return None;
            }
        };

        let cache_key = self.cache_key(query, limit);
        let cached_data: Option<String> = conn.get(&cache_key).await.ok().flatten();

        let data = cached_data?;
        match serde_json::from_str::<CachedLookup>(&data) {
            Ok(result) => {
                let cache_age = chrono::Utc::now() - result.checked_at;
                if cache_age.num_seconds() < self.settings.redis.ttl_seconds as i64 {
                    Some(result)
                } else {
                    let _: std::result::Result<(), _> = conn.del(&cache_key).await;
                    None
                }
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Failed to deserialize cached place lookup");
                let _: std::result::Result<(), _> = conn.del(&cache_key).await;
                None
            }
        }
    }

    /// Cache lookup result in Redis (best effort)
    async fn cache_result(&self, query: &str, limit: u32, suggestions: &[PlaceSuggestion]) {
        let mut conn = match self.redis_client.get_async_connection().await {
            Ok(conn) => conn,
            Err(_) => return,
        };

        let entry = CachedLookup {
            suggestions: suggestions.to_vec(),
            checked_at: chrono::Utc::now(),
        };

        let serialized = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize place lookup for caching");
                return;
            }
        };

        let cache_key = self.cache_key(query, limit);
        let result: std::result::Result<(), _> = conn
            .set_ex(&cache_key, serialized, self.settings.redis.ttl_seconds)
            .await;

        if let Err(e) = result {
            warn!(error = %e, "Failed to cache place lookup");
        } else {
            debug!(query = %query, "Cached place lookup");
        }
    }

    fn cache_key(&self, query: &str, limit: u32) -> String {
        format!(
            "{}geo:search:{}:{}",
            self.settings.redis.prefix,
            limit,
            query.to_lowercase()
        )
    }

    /// Make the actual place-search API request
    async fn make_search_request(&self, query: &str, limit: u32) -> Result<Vec<PlaceSuggestion>> {
        let url = format!(
            "{}/api/?q={}&limit={}",
            self.settings.geocoding.api_url,
            urlencoding::encode(query),
            limit
        );

        debug!(query = %query, url = %url, "Making place-search API request");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TicketryError::Geocoding(GeocodingError::Timeout)
                } else if e.is_connect() {
                    TicketryError::Geocoding(GeocodingError::ServiceUnavailable)
                } else {
                    TicketryError::Geocoding(GeocodingError::RequestFailed(e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TicketryError::Geocoding(GeocodingError::RequestFailed(
                format!("HTTP {}: {}", status, error_text)
            )));
        }

        let search_response: PlaceSearchResponse = response.json().await
            .map_err(|e| TicketryError::Geocoding(GeocodingError::InvalidResponse(e.to_string())))?;

        let suggestions = search_response
            .features
            .into_iter()
            .filter_map(|feature| {
                // [lon, lat] in the payload, (lat, lon) for callers
                let (&lon, &lat) = match feature.geometry.coordinates.as_slice() {
                    [lon, lat, ..] => (lon, lat),
                    _ => return None,
                };

                Some(PlaceSuggestion {
                    name: feature.properties.name?,
                    city: feature.properties.city,
                    country: feature.properties.country,
                    latitude: lat,
                    longitude: lon,
                })
            })
            .collect();

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_response_deserialization() {
        let json = r#"{
            "features": [{
                "properties": {"name": "Uhuru Park", "city": "Nairobi", "country": "Kenya"},
                "geometry": {"coordinates": [36.8219, -1.2921]}
            }]
        }"#;
        let response: PlaceSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.features.len(), 1);
        assert_eq!(response.features[0].properties.name.as_deref(), Some("Uhuru Park"));
    }

    #[test]
    fn test_display_name_skips_missing_parts() {
        let suggestion = PlaceSuggestion {
            name: "Uhuru Park".to_string(),
            city: None,
            country: Some("Kenya".to_string()),
            latitude: -1.2921,
            longitude: 36.8219,
        };
        assert_eq!(suggestion.display_name(), "Uhuru Park, Kenya");
    }

    #[test]
    fn test_cached_lookup_serialization() {
        let entry = CachedLookup {
            suggestions: vec![PlaceSuggestion {
                name: "Uhuru Park".to_string(),
                city: Some("Nairobi".to_string()),
                country: Some("Kenya".to_string()),
                latitude: -1.2921,
                longitude: 36.8219,
            }],
            checked_at: chrono::Utc::now(),
        };

        let serialized = serde_json::to_string(&entry).unwrap();
        let deserialized: CachedLookup = serde_json::from_str(&serialized).unwrap();
        assert_eq!(entry.suggestions, deserialized.suggestions);
    }
}
