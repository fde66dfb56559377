//! Ticket class repository implementation

use sqlx::PgPool;
use uuid::Uuid;
use crate::models::ticket::TicketClass;
use crate::utils::errors::TicketryError;

#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get ticket classes for a single event
    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<TicketClass>, TicketryError> {
        let classes = sqlx::query_as::<_, TicketClass>(
            "SELECT id, event_id, name, price, currency, quantity FROM ticket_classes WHERE event_id = $1 ORDER BY price ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(classes)
    }

    /// Get ticket classes for a set of events in one round trip
    pub async fn list_for_events(&self, event_ids: &[Uuid]) -> Result<Vec<TicketClass>, TicketryError> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let classes = sqlx::query_as::<_, TicketClass>(
            "SELECT id, event_id, name, price, currency, quantity FROM ticket_classes WHERE event_id = ANY($1) ORDER BY event_id, price ASC"
        )
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(classes)
    }
}
