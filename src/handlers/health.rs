//! Health check handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::utils::errors::{Result, TicketryError};

/// `GET /health` — liveness plus database reachability
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    state
        .db
        .health()
        .await
        .map_err(|_| TicketryError::ServiceUnavailable("database unreachable".to_string()))?;

    Ok(Json(json!({ "status": "ok" })))
}
