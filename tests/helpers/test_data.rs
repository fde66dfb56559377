//! Test data helpers for creating test objects
//!
//! This module provides helper functions for creating test events, drafts,
//! and settings used across the integration tests.

use chrono::{TimeZone, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use uuid::Uuid;

use ticketry::client::composer::{EventDraft, TicketClassDraft};
use ticketry::config::Settings;
use ticketry::models::event::{Event, EventStatus, EventSummary};

/// Settings wired for tests: geocoding points at the given mock server,
/// redis at a closed port so the cache falls back to the live API.
pub fn test_settings(geocoding_url: &str, debounce_ms: u64) -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = "test-secret".to_string();
    settings.geocoding.api_url = geocoding_url.trim_end_matches('/').to_string();
    settings.geocoding.debounce_ms = debounce_ms;
    settings.redis.url = "redis://127.0.0.1:6390".to_string();
    settings
}

/// Build an approved event with the given id and category
pub fn approved_event(id: Uuid, category: &str) -> Event {
    Event {
        id,
        title: Sentence(2..5).fake(),
        description: Sentence(5..10).fake(),
        location: "Nairobi, Kenya".to_string(),
        latitude: -1.2921,
        longitude: 36.8219,
        start_date: Utc.with_ymd_and_hms(2025, 10, 1, 19, 0, 0).unwrap(),
        end_date: None,
        image_url: Some("https://images.example.com/event.jpg".to_string()),
        category: category.to_string(),
        status: EventStatus::Approved,
        creator_id: Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Wrap an event in a listing row
pub fn summary(event: Event) -> EventSummary {
    EventSummary {
        event,
        is_bookmarked: false,
    }
}

/// A draft with every requirement satisfied
pub fn complete_draft() -> EventDraft {
    let mut draft = EventDraft::new();
    draft.title = "Jazz Night".to_string();
    draft.description = "<p>An evening of live jazz</p>".to_string();
    draft.category = "music".to_string();
    draft.location_text = "Uhuru Park, Nairobi, Kenya".to_string();
    draft.coordinates = Some((-1.2921, 36.8219));
    draft.start_date = Some(Utc.with_ymd_and_hms(2025, 10, 1, 19, 0, 0).unwrap());
    draft.image_url = Some("https://images.example.com/jazz.jpg".to_string());
    draft.ticket_classes.push(TicketClassDraft {
        name: "Standard".to_string(),
        currency: "KES".to_string(),
        price: "1500".to_string(),
        quantity: "100".to_string(),
    });
    draft
}
