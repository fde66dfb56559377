//! Bookmark repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::bookmark::BookmarkedEvent;
use crate::models::event::EventSummary;
use crate::utils::errors::TicketryError;

/// Postgres unique-violation SQLSTATE, raised on the (user_id, event_id)
/// constraint when a bookmark already exists.
const UNIQUE_VIOLATION: &str = "23505";

/// Outcome of a bookmark creation attempt. Duplicates are a success case,
/// not an error.
#[derive(Debug)]
pub enum BookmarkOutcome {
    Created(BookmarkedEvent),
    AlreadyBookmarked,
}

#[derive(Debug, Clone)]
pub struct BookmarkRepository {
    pool: PgPool,
}

impl BookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a bookmark; a duplicate pair reports `AlreadyBookmarked`.
    pub async fn create(&self, user_id: Uuid, event_id: Uuid) -> Result<BookmarkOutcome, TicketryError> {
        let result = sqlx::query_as::<_, BookmarkedEvent>(
            r#"
            INSERT INTO bookmarked_events (user_id, event_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, event_id, created_at
            "#
        )
        .bind(user_id)
        .bind(event_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(bookmark) => Ok(BookmarkOutcome::Created(bookmark)),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Ok(BookmarkOutcome::AlreadyBookmarked)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove the matching pair. Removing a non-existent bookmark is a
    /// no-op; the number of deleted rows is returned.
    pub async fn delete(&self, user_id: Uuid, event_id: Uuid) -> Result<u64, TicketryError> {
        let result = sqlx::query("DELETE FROM bookmarked_events WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Get a user's bookmarked events, most recently saved first
    pub async fn list_events_for_user(&self, user_id: Uuid) -> Result<Vec<EventSummary>, TicketryError> {
        let events = sqlx::query_as::<_, EventSummary>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.latitude, e.longitude,
                   e.start_date, e.end_date, e.image_url, e.category, e.status,
                   e.creator_id, e.created_at, e.updated_at,
                   TRUE AS is_bookmarked
            FROM bookmarked_events b
            INNER JOIN events e ON e.id = b.event_id
            WHERE b.user_id = $1
            ORDER BY b.created_at DESC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
