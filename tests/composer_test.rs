//! Integration tests for the event composer submission flow

mod helpers;

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::complete_draft;
use ticketry::client::composer::{DraftError, SubmitError};
use ticketry::client::ApiClient;

fn created_event_body() -> serde_json::Value {
    let event_id = Uuid::new_v4();
    json!({
        "id": event_id,
        "title": "Jazz Night",
        "description": "<p>An evening of live jazz</p>",
        "location": "Uhuru Park, Nairobi, Kenya",
        "latitude": -1.2921,
        "longitude": 36.8219,
        "startDate": "2025-10-01T19:00:00Z",
        "endDate": null,
        "imageUrl": "https://images.example.com/jazz.jpg",
        "category": "music",
        "status": "PENDING",
        "creatorId": Uuid::new_v4(),
        "createdAt": "2025-08-01T12:00:00Z",
        "updatedAt": "2025-08-01T12:00:00Z",
        "ticketClasses": [{
            "id": Uuid::new_v4(),
            "eventId": event_id,
            "name": "Standard",
            "price": 1500.0,
            "currency": "KES",
            "quantity": 100
        }]
    })
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_event_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();

    let mut draft = complete_draft();
    draft.ticket_classes.clear();

    let err = draft.submit(&client).await.unwrap_err();
    assert!(matches!(err, SubmitError::Draft(DraftError::NoTicketClasses)));

    // The draft keeps its state for the user to fix
    assert_eq!(draft.title, "Jazz Night");
}

#[tokio::test]
async fn test_successful_submission_clears_the_draft() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_event_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap().with_token("session-token");

    let mut draft = complete_draft();
    let created = draft.submit(&client).await.unwrap();

    assert_eq!(created.event.title, "Jazz Night");
    assert_eq!(created.ticket_classes.len(), 1);

    // Local state resets only after a successful creation
    assert!(draft.title.is_empty());
    assert!(draft.ticket_classes.is_empty());
    assert!(draft.image_url.is_none());
}

#[tokio::test]
async fn test_failed_submission_surfaces_server_error_and_keeps_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Missing required fields" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();

    let mut draft = complete_draft();
    let err = draft.submit(&client).await.unwrap_err();

    match err {
        SubmitError::Api(ticketry::client::ApiError::Server { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing required fields");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing was cleared
    assert_eq!(draft.title, "Jazz Night");
    assert_eq!(draft.ticket_classes.len(), 1);
}
