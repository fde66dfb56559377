//! Typed API client and the client-side workflows built on it
//!
//! This module models the non-UI logic of the consumer front end: a typed
//! client for every API endpoint, the event composer (draft state,
//! validation, payload assembly), the debounced location resolver, and the
//! catalog merge of server results with the static fallback set.

pub mod composer;
pub mod resolver;
pub mod catalog;

pub use composer::{EventDraft, TicketClassDraft, DraftError, SubmitError};
pub use resolver::{LocationResolver, Resolution};
pub use catalog::{fallback_events, merge_events, load_catalog};

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::event::{CreateEventPayload, EventFilter, EventSummary, EventWithTicketClasses};
use crate::models::user::UserRole;

/// Client-side API errors. Server failures carry the `{"error": ...}`
/// message so callers can surface it verbatim.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Account as returned by the API (the password hash never leaves the
/// server, so this mirrors the sanitized wire shape).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: ApiUser,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub user: ApiUser,
}

/// Outcome of a bookmark create call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkToggle {
    Added,
    AlreadyBookmarked,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NoticeBody {
    message: Option<String>,
}

/// Typed client for the Ticketry API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent("Ticketry/1.0")
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            token: None,
        })
    }

    /// Attach a session token for authenticated calls
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn server_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "Unknown server error".to_string());

        ApiError::Server { status, message }
    }

    /// `GET /events` with the given filters
    pub async fn list_events(
        &self,
        filter: &EventFilter,
        user_id: Option<Uuid>,
    ) -> Result<Vec<EventSummary>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();

        if let Some(id) = user_id {
            params.push(("userId", id.to_string()));
        }
        if let Some(ref category) = filter.category {
            params.push(("category", category.clone()));
        }
        if let Some(ref search) = filter.search {
            params.push(("search", search.clone()));
        }
        if let Some(from) = filter.from_date {
            params.push(("fromDate", from.to_rfc3339()));
        }
        if let Some(to) = filter.to_date {
            params.push(("toDate", to.to_rfc3339()));
        }

        let response = self
            .client
            .get(self.url("/events"))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// `POST /events` — requires a session token
    pub async fn create_event(
        &self,
        payload: &CreateEventPayload,
    ) -> Result<EventWithTicketClasses, ApiError> {
        let mut request = self.client.post(self.url("/events")).json(payload);

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// `GET /events/created`
    pub async fn created_events(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<EventWithTicketClasses>, ApiError> {
        let response = self
            .client
            .get(self.url("/events/created"))
            .query(&[("userId", user_id.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// `DELETE /events/created`
    pub async fn delete_event(&self, event_id: Uuid) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url("/events/created"))
            .json(&json!({ "eventId": event_id }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        Ok(())
    }

    /// `GET /events/bookmarked`
    pub async fn bookmarked_events(&self, user_id: Uuid) -> Result<Vec<EventSummary>, ApiError> {
        let response = self
            .client
            .get(self.url("/events/bookmarked"))
            .query(&[("userId", user_id.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// `POST /events/bookmarked` — duplicate saves report
    /// `AlreadyBookmarked`, not an error.
    pub async fn add_bookmark(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<BookmarkToggle, ApiError> {
        let response = self
            .client
            .post(self.url("/events/bookmarked"))
            .json(&json!({ "userId": user_id, "eventId": event_id }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::server_error(response).await);
        }

        if status == reqwest::StatusCode::CREATED {
            return Ok(BookmarkToggle::Added);
        }

        let notice: NoticeBody = response.json().await?;
        match notice.message {
            Some(_) => Ok(BookmarkToggle::AlreadyBookmarked),
            None => Ok(BookmarkToggle::Added),
        }
    }

    /// `DELETE /events/bookmarked`
    pub async fn remove_bookmark(&self, user_id: Uuid, event_id: Uuid) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url("/events/bookmarked"))
            .json(&json!({ "userId": user_id, "eventId": event_id }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        Ok(())
    }

    /// `POST /signup`
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        role: UserRole,
    ) -> Result<SignupResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/signup"))
            .json(&json!({
                "email": email,
                "password": password,
                "firstName": first_name,
                "lastName": last_name,
                "role": role,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// `POST /login`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        Ok(response.json().await?)
    }
}
