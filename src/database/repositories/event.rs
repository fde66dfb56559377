//! Event repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::event::{Event, EventFilter, EventStatus, EventSummary};
use crate::utils::errors::TicketryError;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, TicketryError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, location, latitude, longitude, start_date, end_date, image_url, category, status, creator_id, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Public listing: approved events matching the filter, ordered by start
    /// date, each annotated with the requesting user's bookmark state.
    ///
    /// The filter clauses intentionally mirror `EventFilter::matches`.
    pub async fn list_approved(
        &self,
        filter: &EventFilter,
        user_id: Option<Uuid>,
    ) -> Result<Vec<EventSummary>, TicketryError> {
        let events = sqlx::query_as::<_, EventSummary>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.latitude, e.longitude,
                   e.start_date, e.end_date, e.image_url, e.category, e.status,
                   e.creator_id, e.created_at, e.updated_at,
                   (b.id IS NOT NULL) AS is_bookmarked
            FROM events e
            LEFT JOIN bookmarked_events b
                   ON b.event_id = e.id AND b.user_id = $1
            WHERE e.status = 'APPROVED'
              AND ($2::text IS NULL OR e.category = $2)
              AND ($3::text IS NULL
                   OR e.title ILIKE '%' || $3 || '%'
                   OR e.description ILIKE '%' || $3 || '%')
              AND ($4::timestamptz IS NULL OR e.start_date >= $4)
              AND ($5::timestamptz IS NULL OR e.start_date <= $5)
            ORDER BY e.start_date ASC
            "#
        )
        .bind(user_id)
        .bind(filter.category.as_deref())
        .bind(filter.search.as_deref())
        .bind(filter.from_date)
        .bind(filter.to_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Get events created by a user, regardless of moderation status
    pub async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Event>, TicketryError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, location, latitude, longitude, start_date, end_date, image_url, category, status, creator_id, created_at, updated_at FROM events WHERE creator_id = $1 ORDER BY start_date DESC"
        )
        .bind(creator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Update moderation status (used by the external moderation path)
    pub async fn set_status(&self, id: Uuid, status: EventStatus) -> Result<Event, TicketryError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, title, description, location, latitude, longitude, start_date, end_date, image_url, category, status, creator_id, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }
}
