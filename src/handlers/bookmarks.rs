//! Bookmark handlers: the save-for-later toggle

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::repositories::BookmarkOutcome;
use crate::models::bookmark::BookmarkPayload;
use crate::models::event::EventSummary;
use crate::state::AppState;
use crate::utils::errors::{Result, TicketryError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedEventsQuery {
    pub user_id: Option<Uuid>,
}

/// `GET /events/bookmarked` — a user's saved events, most recent first
pub async fn list_bookmarked(
    State(state): State<AppState>,
    Query(query): Query<BookmarkedEventsQuery>,
) -> Result<Json<Vec<EventSummary>>> {
    let user_id = query
        .user_id
        .ok_or_else(|| TicketryError::Validation("Missing userId".to_string()))?;

    let events = state.db.bookmarks.list_events_for_user(user_id).await?;

    Ok(Json(events))
}

fn require_pair(payload: BookmarkPayload) -> Result<(Uuid, Uuid)> {
    match (payload.user_id, payload.event_id) {
        (Some(user_id), Some(event_id)) => Ok((user_id, event_id)),
        _ => Err(TicketryError::Validation(
            "Missing userId or eventId".to_string(),
        )),
    }
}

/// `POST /events/bookmarked` — save an event. Saving one that is already
/// saved is a success-with-notice, never an error.
pub async fn add_bookmark(
    State(state): State<AppState>,
    Json(payload): Json<BookmarkPayload>,
) -> Result<Response> {
    let (user_id, event_id) = require_pair(payload)?;

    let response = match state.db.bookmarks.create(user_id, event_id).await? {
        BookmarkOutcome::Created(bookmark) => {
            (StatusCode::CREATED, Json(serde_json::to_value(bookmark)?)).into_response()
        }
        BookmarkOutcome::AlreadyBookmarked => {
            (StatusCode::OK, Json(json!({ "message": "Already bookmarked" }))).into_response()
        }
    };

    Ok(response)
}

/// `DELETE /events/bookmarked` — remove the matching pair; removing a
/// non-existent bookmark is a no-op success.
pub async fn remove_bookmark(
    State(state): State<AppState>,
    Json(payload): Json<BookmarkPayload>,
) -> Result<Json<serde_json::Value>> {
    let (user_id, event_id) = require_pair(payload)?;

    state.db.bookmarks.delete(user_id, event_id).await?;

    Ok(Json(json!({ "success": true })))
}
