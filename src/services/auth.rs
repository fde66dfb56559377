//! Authentication service implementation
//!
//! This service handles account signup and login: password hashing and
//! verification (argon2, on a blocking thread), session token issue and
//! decoding (JWT), and email validation. Role-based authorization happens
//! at the API boundary in `middleware::auth`.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::database::repositories::UserRepository;
use crate::models::user::{CreateUserRequest, LoginPayload, SignupPayload, User, UserRole};
use crate::utils::errors::{Result, TicketryError};

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// JWT claims carried by the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
}

/// Authentication service for account management
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(user_repository: UserRepository, settings: Settings) -> Self {
        Self {
            user_repository,
            settings,
        }
    }

    /// Register a new account. The response never includes the hash.
    pub async fn signup(&self, payload: SignupPayload) -> Result<User> {
        let (email, password, first_name, last_name, role) = match payload {
            SignupPayload {
                email: Some(email),
                password: Some(password),
                first_name: Some(first_name),
                last_name: Some(last_name),
                role: Some(role),
            } => (email, password, first_name, last_name, role),
            _ => return Err(TicketryError::Validation("Missing fields".to_string())),
        };

        if !email_regex().is_match(&email) {
            return Err(TicketryError::Validation("Invalid email address".to_string()));
        }

        if self.user_repository.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Signup attempted with existing email");
            return Err(TicketryError::Conflict("Email already in use".to_string()));
        }

        let password_hash = hash_password(password).await?;

        let user = self
            .user_repository
            .create(CreateUserRequest {
                email,
                name: format!("{} {}", first_name, last_name),
                role,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, role = ?user.role, "New account registered");
        Ok(user)
    }

    /// Authenticate an account and issue a session token.
    /// Unknown email and wrong password produce the same message.
    pub async fn login(&self, payload: LoginPayload) -> Result<(User, String)> {
        let (email, password) = match payload {
            LoginPayload {
                email: Some(email),
                password: Some(password),
            } => (email, password),
            _ => {
                return Err(TicketryError::Validation(
                    "Email and password required".to_string(),
                ))
            }
        };

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                TicketryError::Authentication("Invalid email or password".to_string())
            })?;

        if !verify_password(password, user.password_hash.clone()).await? {
            debug!(user_id = %user.id, "Password verification failed");
            return Err(TicketryError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "Account logged in");
        Ok((user, token))
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: (Utc::now() + Duration::hours(self.settings.auth.token_ttl_hours)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.auth.jwt_secret.as_ref()),
        )?;

        Ok(token)
    }

    /// Decode and validate a session token
    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.auth.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }
}

/// Hash a password on a blocking thread
async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| TicketryError::PasswordHash(format!("hashing task failed: {}", e)))?
    .map_err(TicketryError::from)
}

/// Verify a password against a stored hash on a blocking thread.
/// Any verification failure reads as a mismatch.
async fn verify_password(password: String, stored_hash: String) -> Result<bool> {
    let outcome = tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&stored_hash)?;
        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
    })
    .await
    .map_err(|e| TicketryError::PasswordHash(format!("verification task failed: {}", e)))?;

    Ok(outcome.is_ok())
}
