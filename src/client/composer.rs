//! Event composer: draft state, validation, and payload assembly
//!
//! `EventDraft` mirrors the creation form: it collects event details,
//! ticket class rows, a resolved location and an uploaded image URL, and
//! refuses to produce a payload until everything required is present. On a
//! successful submission the draft resets to its initial state; a failed
//! submission surfaces the server message and leaves the draft untouched.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{ApiClient, ApiError};
use crate::models::event::{CreateEventPayload, EventWithTicketClasses, TicketClassPayload};
use crate::services::geocoding::PlaceSuggestion;

/// Event categories offered by the composer
pub const CATEGORIES: &[&str] = &[
    "music",
    "sports",
    "theatre",
    "comedy",
    "conference",
    "workshop",
    "festival",
    "food_drink",
    "networking",
    "charity",
    "family",
    "art",
    "technology",
];

/// Recognized ISO-4217 currency codes accepted for ticket classes
const RECOGNIZED_CURRENCIES: &[&str] = &[
    "AED", "ARS", "AUD", "BDT", "BGN", "BRL", "CAD", "CHF", "CLP", "CNY",
    "COP", "CZK", "DKK", "EGP", "ETB", "EUR", "GBP", "GHS", "HKD", "HUF",
    "IDR", "ILS", "INR", "JPY", "KES", "KRW", "KWD", "LKR", "MAD", "MXN",
    "MYR", "NGN", "NOK", "NZD", "PEN", "PHP", "PKR", "PLN", "QAR", "RON",
    "RSD", "RWF", "SAR", "SEK", "SGD", "THB", "TND", "TRY", "TZS", "UAH",
    "UGX", "USD", "UYU", "VND", "XAF", "XOF", "ZAR", "ZMW",
];

/// Whether a currency code is a recognized ISO-4217 code
pub fn is_recognized_currency(code: &str) -> bool {
    RECOGNIZED_CURRENCIES.contains(&code)
}

/// Composer validation errors, one per unmet requirement
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please fill in all required event details")]
    MissingDetails,

    #[error("Please add at least one ticket class")]
    NoTicketClasses,

    #[error("Please ensure all ticket fields are filled")]
    IncompleteTicketClass,

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid ticket price: {0}")]
    InvalidPrice(String),

    #[error("Invalid ticket quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unknown event category: {0}")]
    UnknownCategory(String),

    #[error("Please select a valid event location")]
    UnresolvedLocation,

    #[error("Please select a start date and time")]
    MissingStartDate,

    #[error("Please upload an event image")]
    MissingImage,
}

/// Submission failures: either the draft is incomplete (no network call is
/// made) or the server rejected the payload.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A ticket class row as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketClassDraft {
    pub name: String,
    pub currency: String,
    pub price: String,
    pub quantity: String,
}

impl TicketClassDraft {
    fn is_blank(&self) -> bool {
        self.name.is_empty()
            || self.currency.is_empty()
            || self.price.is_empty()
            || self.quantity.is_empty()
    }

    fn to_payload(&self) -> Result<TicketClassPayload, DraftError> {
        if self.is_blank() {
            return Err(DraftError::IncompleteTicketClass);
        }

        let currency = self.currency.to_uppercase();
        if !is_recognized_currency(&currency) {
            return Err(DraftError::InvalidCurrency(self.currency.clone()));
        }

        let price: f64 = self
            .price
            .parse()
            .map_err(|_| DraftError::InvalidPrice(self.price.clone()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(DraftError::InvalidPrice(self.price.clone()));
        }

        let quantity: i32 = self
            .quantity
            .parse()
            .map_err(|_| DraftError::InvalidQuantity(self.quantity.clone()))?;
        if quantity < 1 {
            return Err(DraftError::InvalidQuantity(self.quantity.clone()));
        }

        Ok(TicketClassPayload {
            name: Some(self.name.clone()),
            price: Some(price),
            currency: Some(currency),
            quantity: Some(quantity),
        })
    }
}

/// Draft state for the event creation form
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location_text: String,
    pub coordinates: Option<(f64, f64)>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub ticket_classes: Vec<TicketClassDraft>,
}

impl EventDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty ticket class row
    pub fn add_ticket_class(&mut self) {
        self.ticket_classes.push(TicketClassDraft::default());
    }

    /// Remove a ticket class row
    pub fn remove_ticket_class(&mut self, index: usize) {
        if index < self.ticket_classes.len() {
            self.ticket_classes.remove(index);
        }
    }

    /// Apply a resolved location: display text plus (lat, lon) coordinates
    pub fn set_location(&mut self, suggestion: &PlaceSuggestion) {
        self.location_text = suggestion.display_name();
        self.coordinates = Some((suggestion.latitude, suggestion.longitude));
    }

    /// Record the hosted image URL returned by the media upload
    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.image_url = Some(url.into());
    }

    /// Reset the draft to its initial state
    pub fn clear(&mut self) {
        *self = EventDraft::new();
    }

    /// Validate the draft and assemble the creation payload. Nothing is
    /// sent anywhere until this succeeds.
    pub fn build_payload(&self) -> Result<CreateEventPayload, DraftError> {
        if self.title.is_empty() || self.description.is_empty() || self.location_text.is_empty() {
            return Err(DraftError::MissingDetails);
        }

        if self.category.is_empty() {
            return Err(DraftError::MissingDetails);
        }
        if !CATEGORIES.contains(&self.category.as_str()) {
            return Err(DraftError::UnknownCategory(self.category.clone()));
        }

        if self.ticket_classes.is_empty() {
            return Err(DraftError::NoTicketClasses);
        }

        let ticket_classes = self
            .ticket_classes
            .iter()
            .map(TicketClassDraft::to_payload)
            .collect::<Result<Vec<_>, _>>()?;

        let (latitude, longitude) = self.coordinates.ok_or(DraftError::UnresolvedLocation)?;
        let start_date = self.start_date.ok_or(DraftError::MissingStartDate)?;
        let image_url = self.image_url.clone().ok_or(DraftError::MissingImage)?;

        Ok(CreateEventPayload {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            location: Some(self.location_text.clone()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            start_date: Some(start_date),
            end_date: self.end_date,
            image_url: Some(image_url),
            category: Some(self.category.clone()),
            ticket_classes: Some(ticket_classes),
        })
    }

    /// Submit the draft. On success the draft is cleared; on failure the
    /// error is surfaced and the draft keeps its state.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
    ) -> Result<EventWithTicketClasses, SubmitError> {
        let payload = self.build_payload()?;

        match client.create_event(&payload).await {
            Ok(created) => {
                self.clear();
                Ok(created)
            }
            Err(err) => Err(SubmitError::Api(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> EventDraft {
        let mut draft = EventDraft::new();
        draft.title = "Jazz Night".to_string();
        draft.description = "<p>An evening of live jazz</p>".to_string();
        draft.category = "music".to_string();
        draft.location_text = "Uhuru Park, Nairobi, Kenya".to_string();
        draft.coordinates = Some((-1.2921, 36.8219));
        draft.start_date = Some(Utc::now());
        draft.image_url = Some("https://img.example.com/jazz.jpg".to_string());
        draft.ticket_classes.push(TicketClassDraft {
            name: "Standard".to_string(),
            currency: "KES".to_string(),
            price: "1500".to_string(),
            quantity: "100".to_string(),
        });
        draft
    }

    #[test]
    fn test_complete_draft_builds_payload() {
        let payload = complete_draft().build_payload().unwrap();
        assert_eq!(payload.title.as_deref(), Some("Jazz Night"));
        assert_eq!(payload.latitude, Some(-1.2921));
        assert_eq!(payload.ticket_classes.unwrap().len(), 1);
    }

    #[test]
    fn test_zero_ticket_classes_rejected_before_any_network_call() {
        let mut draft = complete_draft();
        draft.ticket_classes.clear();
        assert_eq!(draft.build_payload().unwrap_err(), DraftError::NoTicketClasses);
    }

    #[test]
    fn test_unrecognized_currency_rejected() {
        let mut draft = complete_draft();
        draft.ticket_classes[0].currency = "XYZ".to_string();
        assert_eq!(
            draft.build_payload().unwrap_err(),
            DraftError::InvalidCurrency("XYZ".to_string())
        );
    }

    #[test]
    fn test_currency_is_upcased_before_validation() {
        let mut draft = complete_draft();
        draft.ticket_classes[0].currency = "usd".to_string();
        let payload = draft.build_payload().unwrap();
        let classes = payload.ticket_classes.unwrap();
        assert_eq!(classes[0].currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_unresolved_location_rejected() {
        let mut draft = complete_draft();
        draft.coordinates = None;
        assert_eq!(draft.build_payload().unwrap_err(), DraftError::UnresolvedLocation);
    }

    #[test]
    fn test_missing_image_rejected() {
        let mut draft = complete_draft();
        draft.image_url = None;
        assert_eq!(draft.build_payload().unwrap_err(), DraftError::MissingImage);
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let mut draft = complete_draft();
        draft.ticket_classes[0].price = "free".to_string();
        assert_eq!(
            draft.build_payload().unwrap_err(),
            DraftError::InvalidPrice("free".to_string())
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut draft = complete_draft();
        draft.ticket_classes[0].quantity = "0".to_string();
        assert_eq!(
            draft.build_payload().unwrap_err(),
            DraftError::InvalidQuantity("0".to_string())
        );
    }

    #[test]
    fn test_set_location_fills_text_and_coordinates() {
        let mut draft = EventDraft::new();
        draft.set_location(&PlaceSuggestion {
            name: "Uhuru Park".to_string(),
            city: Some("Nairobi".to_string()),
            country: Some("Kenya".to_string()),
            latitude: -1.2921,
            longitude: 36.8219,
        });

        assert_eq!(draft.location_text, "Uhuru Park, Nairobi, Kenya");
        assert_eq!(draft.coordinates, Some((-1.2921, 36.8219)));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut draft = complete_draft();
        draft.clear();
        assert!(draft.title.is_empty());
        assert!(draft.ticket_classes.is_empty());
        assert!(draft.coordinates.is_none());
        assert!(draft.image_url.is_none());
    }
}
