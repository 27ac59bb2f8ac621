use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token_expires_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        avatar: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email: email.to_lowercase(),
            password_hash,
            avatar,
            refresh_token: None,
            refresh_token_expires_at: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// A refresh token without a parseable expiry counts as expired.
    pub fn refresh_token_expired(&self) -> bool {
        match &self.refresh_token_expires_at {
            Some(expires_at) => match chrono::DateTime::parse_from_rfc3339(expires_at) {
                Ok(expires_at) => expires_at < chrono::Utc::now(),
                Err(_) => true,
            },
            None => true,
        }
    }
}

// DTOs for API requests/responses

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> DomainResult<()> {
        let len = self.username.trim().chars().count();
        if !(3..=50).contains(&len) {
            return Err(DomainError::ValidationError(
                "Username must be 3-50 characters long".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
