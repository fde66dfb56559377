//! Bookmark model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A saved-for-later association between a user and an event.
/// The (user_id, event_id) pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Toggle payload shared by the bookmark create and delete endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPayload {
    pub user_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
}
