//! Database service layer
//!
//! This module provides a high-level interface to database operations.
//! Multi-table writes (event creation with its ticket classes, the full
//! event cascade delete) run inside a single transaction here.

use std::collections::HashMap;
use uuid::Uuid;

use crate::database::{DatabasePool, UserRepository, EventRepository, TicketRepository, BookmarkRepository};
use crate::models::event::{CreateEventRequest, Event, EventWithTicketClasses};
use crate::models::ticket::{CreateTicketClassRequest, TicketClass};
use crate::utils::errors::TicketryError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub events: EventRepository,
    pub tickets: TicketRepository,
    pub bookmarks: BookmarkRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            tickets: TicketRepository::new(pool.clone()),
            bookmarks: BookmarkRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create an event together with its ticket classes in one transaction.
    /// An event without at least one ticket class is rejected.
    pub async fn create_event_with_classes(
        &self,
        request: CreateEventRequest,
        classes: Vec<CreateTicketClassRequest>,
    ) -> Result<EventWithTicketClasses, TicketryError> {
        if classes.is_empty() {
            return Err(TicketryError::Validation(
                "An event requires at least one ticket class".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, location, latitude, longitude, start_date, end_date, image_url, category, status, creator_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'PENDING', $10, NOW(), NOW())
            RETURNING id, title, description, location, latitude, longitude, start_date, end_date, image_url, category, status, creator_id, created_at, updated_at
            "#
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.location)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.image_url)
        .bind(&request.category)
        .bind(request.creator_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut ticket_classes = Vec::with_capacity(classes.len());
        for class in classes {
            let ticket_class = sqlx::query_as::<_, TicketClass>(
                r#"
                INSERT INTO ticket_classes (event_id, name, price, currency, quantity)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, event_id, name, price, currency, quantity
                "#
            )
            .bind(event.id)
            .bind(&class.name)
            .bind(class.price)
            .bind(&class.currency)
            .bind(class.quantity)
            .fetch_one(&mut *tx)
            .await?;

            ticket_classes.push(ticket_class);
        }

        tx.commit().await?;

        tracing::info!(event_id = %event.id, creator_id = %event.creator_id, "Event created");

        Ok(EventWithTicketClasses { event, ticket_classes })
    }

    /// Delete an event and everything hanging off it (tickets, ticket
    /// classes, bookmarks) in one transaction, so a crash mid-sequence can
    /// never leave orphaned rows.
    pub async fn delete_event_cascade(&self, event_id: Uuid) -> Result<(), TicketryError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Err(TicketryError::EventNotFound { event_id });
        }

        sqlx::query("DELETE FROM tickets WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM ticket_classes WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM bookmarked_events WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(event_id = %event_id, "Event deleted with its ticket classes and bookmarks");

        Ok(())
    }

    /// Check database reachability
    pub async fn health(&self) -> Result<(), TicketryError> {
        crate::database::connection::health_check(&self.pool).await
    }

    /// Creator dashboard listing: a user's events with their ticket classes
    pub async fn created_events_with_classes(
        &self,
        creator_id: Uuid,
    ) -> Result<Vec<EventWithTicketClasses>, TicketryError> {
        let events = self.events.list_by_creator(creator_id).await?;
        let event_ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();

        let mut classes_by_event: HashMap<Uuid, Vec<TicketClass>> = HashMap::new();
        for class in self.tickets.list_for_events(&event_ids).await? {
            classes_by_event.entry(class.event_id).or_default().push(class);
        }

        Ok(events
            .into_iter()
            .map(|event| {
                let ticket_classes = classes_by_event.remove(&event.id).unwrap_or_default();
                EventWithTicketClasses { event, ticket_classes }
            })
            .collect())
    }
}
