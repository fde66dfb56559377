//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::user::{User, CreateUserRequest};
use crate::utils::errors::TicketryError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, TicketryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, role, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, name, role, password_hash, created_at, updated_at
            "#
        )
        .bind(request.email)
        .bind(request.name)
        .bind(request.role)
        .bind(request.password_hash)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, TicketryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, role, password_hash, created_at, updated_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, TicketryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, role, password_hash, created_at, updated_at FROM users WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
