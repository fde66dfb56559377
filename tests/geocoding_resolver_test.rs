//! Integration tests for the geocoding service and the debounced resolver

mod helpers;

use std::time::Duration;

use wiremock::MockServer;

use helpers::{mount_no_match, mount_single_match, test_settings};
use ticketry::client::resolver::{LocationResolver, Resolution};
use ticketry::config::Settings;
use ticketry::services::geocoding::GeocodingService;

fn service_for(settings: &Settings) -> GeocodingService {
    let redis_client = redis::Client::open(settings.redis.url.clone()).unwrap();
    GeocodingService::new(redis_client, settings.clone()).unwrap()
}

#[tokio::test]
async fn test_resolve_takes_first_match_and_swaps_coordinates() {
    let server = MockServer::start().await;
    mount_single_match(&server, 1).await;

    let settings = test_settings(&server.uri(), 50);
    let service = service_for(&settings);

    let suggestion = service.resolve("Uhuru Park").await.unwrap().unwrap();

    // API emits [lon, lat]; the suggestion carries (lat, lon)
    assert_eq!(suggestion.latitude, -1.2921);
    assert_eq!(suggestion.longitude, 36.8219);
    assert_eq!(suggestion.display_name(), "Uhuru Park, Nairobi, Kenya");
}

#[tokio::test]
async fn test_resolve_with_no_match_returns_none() {
    let server = MockServer::start().await;
    mount_no_match(&server).await;

    let settings = test_settings(&server.uri(), 50);
    let service = service_for(&settings);

    assert!(service.resolve("nowhere in particular").await.unwrap().is_none());
}

#[tokio::test]
async fn test_only_the_latest_query_fires() {
    let server = MockServer::start().await;
    // The superseded query must never reach the API
    mount_single_match(&server, 1).await;

    let settings = test_settings(&server.uri(), 100);
    let resolver = LocationResolver::new(service_for(&settings), &settings.geocoding);

    let first = resolver.clone();
    let pending = tokio::spawn(async move { first.submit_query("Nairobi CBD").await });

    // A new keystroke arrives before the quiet period elapses
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = resolver.submit_query("Uhuru Park").await.unwrap();

    let first_outcome = pending.await.unwrap().unwrap();

    assert_eq!(first_outcome, Resolution::Superseded);
    assert!(matches!(second, Resolution::Resolved(_)));
}

#[tokio::test]
async fn test_short_queries_are_ignored() {
    let server = MockServer::start().await;
    // Nothing should reach the API for a short query
    mount_single_match(&server, 0).await;

    let settings = test_settings(&server.uri(), 10);
    let resolver = LocationResolver::new(service_for(&settings), &settings.geocoding);

    let outcome = resolver.submit_query("Ngo").await.unwrap();
    assert_eq!(outcome, Resolution::TooShort);
}
