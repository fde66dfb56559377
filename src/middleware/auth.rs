//! Authentication middleware
//!
//! This module provides authentication and authorization middleware for
//! protecting API routes. Sessions are Bearer JWTs; the decoded claims are
//! attached to the request for handlers to consume. Authorization is
//! dispatched on the typed `UserRole` enum, never on strings.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::models::user::UserRole;
use crate::services::auth::Claims;
use crate::state::AppState;
use crate::utils::errors::{Result, TicketryError};

/// Extract and validate the Bearer token, attaching `Claims` to the request
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .ok_or_else(|| TicketryError::Authentication("Unauthorized".to_string()))?;

    let claims = state.services.auth_service.decode_token(token)?;

    debug!(user_id = %claims.sub, role = ?claims.role, "Request authenticated");
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Check that the authenticated account may publish events
pub fn require_event_creator(claims: &Claims) -> Result<()> {
    match claims.role {
        UserRole::Creator | UserRole::Admin => Ok(()),
        UserRole::Viewer => {
            warn!(user_id = %claims.sub, "Viewer attempted to create an event");
            Err(TicketryError::PermissionDenied(
                "Creator privileges required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn claims_with_role(role: UserRole) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            role,
            exp: (Utc::now() + chrono::Duration::hours(1)).timestamp(),
        }
    }

    #[test]
    fn test_creator_and_admin_may_create_events() {
        assert!(require_event_creator(&claims_with_role(UserRole::Creator)).is_ok());
        assert!(require_event_creator(&claims_with_role(UserRole::Admin)).is_ok());
    }

    #[test]
    fn test_viewer_may_not_create_events() {
        let result = require_event_creator(&claims_with_role(UserRole::Viewer));
        assert!(matches!(result, Err(TicketryError::PermissionDenied(_))));
    }
}
