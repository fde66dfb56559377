//! Ticket class and issued ticket models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A named pricing tier for an event with its own quantity and currency.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketClass {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
}

/// An issued ticket. Removed along with its event on cascade delete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub event_id: Uuid,
    pub ticket_class_id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateTicketClassRequest {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
}
