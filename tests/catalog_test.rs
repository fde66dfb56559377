//! Integration tests for catalog merging and fallback filtering

mod helpers;

use std::collections::BTreeSet;
use std::collections::HashSet;

use proptest::prelude::*;
use uuid::Uuid;

use helpers::{approved_event, summary};
use ticketry::client::catalog::{filter_fallback, merge_events};
use ticketry::models::event::EventFilter;

proptest! {
    /// Merged output carries unique ids: every server row survives, and
    /// fallback rows appear only when the server did not provide that id.
    #[test]
    fn test_merge_dedups_by_id_with_server_priority(
        api_ids in prop::collection::btree_set(0u128..40, 0..8),
        fallback_ids in prop::collection::btree_set(0u128..40, 0..8),
    ) {
        let api_ids: Vec<u128> = api_ids.into_iter().collect();
        let fallback_ids: Vec<u128> = fallback_ids.into_iter().collect();

        let api: Vec<_> = api_ids
            .iter()
            .map(|&id| summary(approved_event(Uuid::from_u128(id), "music")))
            .collect();
        let fallback: Vec<_> = fallback_ids
            .iter()
            .map(|&id| summary(approved_event(Uuid::from_u128(id), "festival")))
            .collect();

        let merged = merge_events(api, fallback);

        // No duplicate ids
        let ids: HashSet<Uuid> = merged.iter().map(|e| e.event.id).collect();
        prop_assert_eq!(ids.len(), merged.len());

        // Server rows come first, in order
        for (i, &id) in api_ids.iter().enumerate() {
            prop_assert_eq!(merged[i].event.id, Uuid::from_u128(id));
        }

        // Expected size: api plus fallback entries the server did not send
        let api_set: BTreeSet<u128> = api_ids.iter().copied().collect();
        let extra = fallback_ids.iter().filter(|id| !api_set.contains(id)).count();
        prop_assert_eq!(merged.len(), api_ids.len() + extra);

        // Conflicting ids kept the server's copy (category marks origin)
        for entry in &merged {
            if api_set.contains(&entry.event.id.as_u128()) {
                prop_assert_eq!(&entry.event.category, "music");
            }
        }
    }
}

#[test]
fn test_empty_filter_passes_whole_fallback_set() {
    let filter = EventFilter::default();
    assert!(filter.is_empty());

    let filtered = filter_fallback(&filter);
    assert_eq!(filtered.len(), 3);
}

#[test]
fn test_category_filter_restricts_fallback_set() {
    let filter = EventFilter {
        category: Some("food_drink".to_string()),
        ..Default::default()
    };

    let filtered = filter_fallback(&filter);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].event.category, "food_drink");
}

#[test]
fn test_unknown_category_filters_everything_out() {
    let filter = EventFilter {
        category: Some("opera".to_string()),
        ..Default::default()
    };

    assert!(filter_fallback(&filter).is_empty());
}
