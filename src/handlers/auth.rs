//! Account handlers: signup and login

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::models::user::{LoginPayload, SignupPayload};
use crate::state::AppState;
use crate::utils::errors::Result;

/// `POST /signup` — create an account. The response omits the password
/// hash; a taken email reports 409.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<Json<Value>> {
    let user = state.services.auth_service.signup(payload).await?;

    Ok(Json(json!({ "user": user })))
}

/// `POST /login` — authenticate and issue a session token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Value>> {
    let (user, token) = state.services.auth_service.login(payload).await?;

    Ok(Json(json!({ "user": user, "token": token })))
}
