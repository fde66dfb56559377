//! Event handlers: public listing, creation, and the creator dashboard

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::middleware::auth::require_event_creator;
use crate::models::event::{CreateEventPayload, EventFilter, EventSummary, EventWithTicketClasses};
use crate::services::auth::Claims;
use crate::state::AppState;
use crate::utils::errors::{Result, TicketryError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    pub user_id: Option<Uuid>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub from_date: Option<chrono::DateTime<chrono::Utc>>,
    pub to_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// `GET /events` — public listing: approved events matching the filters,
/// annotated with the requesting user's bookmark state.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<EventSummary>>> {
    let filter = EventFilter {
        category: query.category,
        search: query.search,
        from_date: query.from_date,
        to_date: query.to_date,
    };

    let events = state
        .db
        .events
        .list_approved(&filter, query.user_id)
        .await?;

    Ok(Json(events))
}

/// `POST /events` — create an event with its ticket classes. Requires an
/// authenticated CREATOR or ADMIN; created events await moderation.
pub async fn create_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateEventPayload>,
) -> Result<(StatusCode, Json<EventWithTicketClasses>)> {
    require_event_creator(&claims)?;

    let (request, ticket_classes) = payload.validate(claims.sub)?;
    let created = state
        .db
        .create_event_with_classes(request, ticket_classes)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEventsQuery {
    pub user_id: Option<Uuid>,
}

/// `GET /events/created` — a user's events regardless of status, with
/// ticket classes attached, newest start date first.
pub async fn created_events(
    State(state): State<AppState>,
    Query(query): Query<CreatedEventsQuery>,
) -> Result<Json<Vec<EventWithTicketClasses>>> {
    let user_id = query
        .user_id
        .ok_or_else(|| TicketryError::Validation("Missing userId".to_string()))?;

    let events = state.db.created_events_with_classes(user_id).await?;

    Ok(Json(events))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventPayload {
    pub event_id: Option<Uuid>,
}

/// `DELETE /events/created` — remove an event and everything hanging off
/// it (tickets, ticket classes, bookmarks) in one transaction.
pub async fn delete_created_event(
    State(state): State<AppState>,
    Json(payload): Json<DeleteEventPayload>,
) -> Result<Json<Value>> {
    let event_id = payload
        .event_id
        .ok_or_else(|| TicketryError::Validation("Missing eventId".to_string()))?;

    state.db.delete_event_cascade(event_id).await?;

    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
