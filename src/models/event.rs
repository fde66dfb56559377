//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ticket::TicketClass;

/// Moderation status. Events are created PENDING and approved externally;
/// only APPROVED events appear in public listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "event_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Pending,
    Approved,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub category: String,
    pub status: EventStatus,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event row annotated with the requesting user's bookmark state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub is_bookmarked: bool,
}

/// Event with its ticket classes attached (creator dashboard listing).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithTicketClasses {
    #[serde(flatten)]
    pub event: Event,
    pub ticket_classes: Vec<TicketClass>,
}

/// Validated internal creation request.
#[derive(Debug, Clone)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub category: String,
    pub creator_id: Uuid,
}

/// Event creation payload as posted by the composer. Every field is
/// optional so the handler can report missing fields as a 400 instead of a
/// body-rejection failure; `validate` produces the internal request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub ticket_classes: Option<Vec<TicketClassPayload>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketClassPayload {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub quantity: Option<i32>,
}

impl CreateEventPayload {
    /// Validate required fields and produce the internal creation request
    /// plus its ticket classes. Any gap reports as a single 400.
    pub fn validate(
        self,
        creator_id: Uuid,
    ) -> Result<(CreateEventRequest, Vec<crate::models::ticket::CreateTicketClassRequest>), crate::utils::errors::TicketryError>
    {
        use crate::models::ticket::CreateTicketClassRequest;
        use crate::utils::errors::TicketryError;

        let missing = || TicketryError::Validation("Missing required fields".to_string());

        let title = self.title.filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let description = self.description.filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let location = self.location.filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let latitude = self.latitude.ok_or_else(missing)?;
        let longitude = self.longitude.ok_or_else(missing)?;
        let start_date = self.start_date.ok_or_else(missing)?;
        let category = self.category.filter(|s| !s.is_empty()).ok_or_else(missing)?;

        let classes = self.ticket_classes.unwrap_or_default();
        if classes.is_empty() {
            return Err(missing());
        }

        let mut ticket_classes = Vec::with_capacity(classes.len());
        for class in classes {
            let (name, price, currency, quantity) = match class {
                TicketClassPayload {
                    name: Some(name),
                    price: Some(price),
                    currency: Some(currency),
                    quantity: Some(quantity),
                } if !name.is_empty() && !currency.is_empty() => (name, price, currency, quantity),
                _ => return Err(missing()),
            };

            ticket_classes.push(CreateTicketClassRequest {
                name,
                price,
                currency,
                quantity,
            });
        }

        let request = CreateEventRequest {
            title,
            description,
            location,
            latitude,
            longitude,
            start_date,
            end_date: self.end_date,
            image_url: self.image_url,
            category,
            creator_id,
        };

        Ok((request, ticket_classes))
    }
}

/// Listing filters. The same predicate drives the SQL listing query and
/// the client-side fallback filtering, so the two can never disagree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.search.is_none()
            && self.from_date.is_none()
            && self.to_date.is_none()
    }

    /// Apply the listing semantics to a single event: exact category match,
    /// case-insensitive substring search over title or description, and an
    /// inclusive start-date range. Status is checked by the caller.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(ref category) = self.category {
            if &event.category != category {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            let in_title = event.title.to_lowercase().contains(&needle);
            let in_description = event.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }

        if let Some(from) = self.from_date {
            if event.start_date < from {
                return false;
            }
        }

        if let Some(to) = self.to_date {
            if event.start_date > to {
                return false;
            }
        }

        true
    }
}
