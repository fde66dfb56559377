//! Catalog assembly: server results merged with the static fallback set
//!
//! The home page always has something to show: a small built-in set of
//! events backs the live listing. Server rows win on conflicts, and the
//! fallback set is filtered with the same `EventFilter` predicate the
//! server applies, so the two sources can never disagree on semantics.

use std::collections::HashSet;

use chrono::TimeZone;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use super::ApiClient;
use crate::models::event::{Event, EventFilter, EventStatus, EventSummary};

fn fallback_entry(
    id: &str,
    title: &str,
    description: &str,
    location: &str,
    latitude: f64,
    longitude: f64,
    start: chrono::DateTime<Utc>,
    image_url: &str,
    category: &str,
) -> EventSummary {
    EventSummary {
        event: Event {
            id: Uuid::parse_str(id).expect("valid fallback event id"),
            title: title.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            latitude,
            longitude,
            start_date: start,
            end_date: None,
            image_url: Some(image_url.to_string()),
            category: category.to_string(),
            status: EventStatus::Approved,
            creator_id: Uuid::nil(),
            created_at: start,
            updated_at: start,
        },
        is_bookmarked: false,
    }
}

/// The static fallback set shown when the server has nothing to add
pub fn fallback_events() -> Vec<EventSummary> {
    vec![
        fallback_entry(
            "5f6a1c5e-0f1f-4a46-9c89-0a1d2d9f3b01",
            "Sunset Jazz Festival",
            "An open-air evening of jazz with headline acts from across the region.",
            "Uhuru Gardens, Nairobi",
            -1.3236,
            36.8172,
            Utc.with_ymd_and_hms(2025, 8, 23, 17, 0, 0).unwrap(),
            "https://images.example.com/events/sunset-jazz.jpg",
            "music",
        ),
        fallback_entry(
            "9b2d7c44-3c5a-4d6e-8f10-6b7a8c9d0e02",
            "Founders & Builders Meetup",
            "Lightning talks and networking for early-stage product teams.",
            "iHub, Nairobi",
            -1.2995,
            36.7809,
            Utc.with_ymd_and_hms(2025, 9, 4, 18, 30, 0).unwrap(),
            "https://images.example.com/events/founders-meetup.jpg",
            "networking",
        ),
        fallback_entry(
            "c3e8f2a1-7b4d-4e5f-a6b7-c8d9e0f1a203",
            "Street Food Carnival",
            "A weekend celebration of street food, craft drinks and live cooking.",
            "Ngong Racecourse, Nairobi",
            -1.3048,
            36.7440,
            Utc.with_ymd_and_hms(2025, 9, 13, 11, 0, 0).unwrap(),
            "https://images.example.com/events/street-food.jpg",
            "food_drink",
        ),
    ]
}

/// Merge server results with fallback entries, de-duplicating by event id.
/// Server rows come first and win conflicts.
pub fn merge_events(api: Vec<EventSummary>, fallback: Vec<EventSummary>) -> Vec<EventSummary> {
    let seen: HashSet<Uuid> = api.iter().map(|summary| summary.event.id).collect();

    let mut merged = api;
    merged.extend(
        fallback
            .into_iter()
            .filter(|summary| !seen.contains(&summary.event.id)),
    );

    merged
}

/// Filter the fallback set with the shared listing predicate. Only
/// approved entries pass, matching the server's listing restriction.
pub fn filter_fallback(filter: &EventFilter) -> Vec<EventSummary> {
    fallback_events()
        .into_iter()
        .filter(|summary| summary.event.status == EventStatus::Approved)
        .filter(|summary| filter.matches(&summary.event))
        .collect()
}

/// Load the catalog: fetch the filtered server listing, fall back to an
/// empty set when the fetch fails, and merge in the static entries.
pub async fn load_catalog(
    client: &ApiClient,
    filter: &EventFilter,
    user_id: Option<Uuid>,
) -> Vec<EventSummary> {
    let api_events = match client.list_events(filter, user_id).await {
        Ok(events) => events,
        Err(err) => {
            warn!(error = %err, "Failed to fetch events, using fallback catalog only");
            Vec::new()
        }
    };

    merge_events(api_events, filter_fallback(filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_events_are_approved_with_unique_ids() {
        let events = fallback_events();
        assert_eq!(events.len(), 3);

        let ids: HashSet<Uuid> = events.iter().map(|e| e.event.id).collect();
        assert_eq!(ids.len(), events.len());

        assert!(events.iter().all(|e| e.event.status == EventStatus::Approved));
        assert!(events.iter().all(|e| !e.is_bookmarked));
    }

    #[test]
    fn test_merge_gives_server_rows_priority() {
        let fallback = fallback_events();
        let mut from_server = fallback[0].clone();
        from_server.is_bookmarked = true;

        let merged = merge_events(vec![from_server.clone()], fallback.clone());

        assert_eq!(merged.len(), fallback.len());
        assert_eq!(merged[0].event.id, from_server.event.id);
        // The server copy (bookmarked) replaced the fallback copy
        assert!(merged[0].is_bookmarked);
    }

    #[test]
    fn test_merge_keeps_unmatched_fallback_entries() {
        let merged = merge_events(Vec::new(), fallback_events());
        assert_eq!(merged.len(), fallback_events().len());
    }

    #[test]
    fn test_filter_fallback_by_category() {
        let filter = EventFilter {
            category: Some("music".to_string()),
            ..Default::default()
        };

        let filtered = filter_fallback(&filter);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|e| e.event.category == "music"));
    }

    #[test]
    fn test_filter_fallback_by_search_matches_description() {
        let filter = EventFilter {
            search: Some("NETWORKING".to_string()),
            ..Default::default()
        };

        let filtered = filter_fallback(&filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].event.category, "networking");
    }
}
