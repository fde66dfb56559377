//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Account role, dispatched as a typed enum at the API boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Viewer,
    Creator,
    Admin,
}

impl UserRole {
    /// Whether this role may publish events.
    pub fn can_create_events(&self) -> bool {
        match self {
            UserRole::Creator | UserRole::Admin => true,
            UserRole::Viewer => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Internal creation request; the password is already hashed by the
/// auth service before it reaches the repository.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub password_hash: String,
}

/// Signup payload. All fields are optional so missing-field errors are
/// reported as 400s rather than body-rejection failures.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_event_creation_dispatch() {
        assert!(!UserRole::Viewer.can_create_events());
        assert!(UserRole::Creator.can_create_events());
        assert!(UserRole::Admin.can_create_events());
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::Creator).unwrap(), "\"CREATOR\"");
        let role: UserRole = serde_json::from_str("\"VIEWER\"").unwrap();
        assert_eq!(role, UserRole::Viewer);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            role: UserRole::Viewer,
            password_hash: "secret-hash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("passwordHash"));
    }
}
