use crate::application::services::SessionService;
use crate::domain::entities::{SignupRequest, TokenResponse, User};
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::shared::utils::email_validator::validate_and_normalize_email;
use crate::shared::utils::gravatar::gravatar_url;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use std::sync::Arc;

/// Validates password length: 6-72 characters
pub fn validate_password_complexity(password: &str) -> ApiResult<()> {
    let len = password.chars().count();
    if !(6..=72).contains(&len) {
        return Err(ApiError::BadRequest(
            "Password must be 6-72 characters long".to_string(),
        ));
    }

    Ok(())
}

/// Hash password using Argon2id with parameters:
/// - m_cost = 19456 KiB (19 MiB)
/// - t_cost = 2 iterations
/// - p_cost = 1 thread
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .build()
        .map_err(|_| ApiError::Internal("Failed to build Argon2 params".to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify password against Argon2id hash
pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| ApiError::Internal("Invalid password hash format".to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate secure random token (32 bytes = 64 hex characters)
pub fn generate_session_token() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Signup, login and token rotation.
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    session_service: SessionService,
    refresh_token_duration_days: i64,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_service: SessionService,
        refresh_token_duration_days: i64,
    ) -> Self {
        Self {
            user_repo,
            session_service,
            refresh_token_duration_days,
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> ApiResult<User> {
        request.validate()?;
        let email = validate_and_normalize_email(&request.email)?;
        validate_password_complexity(&request.password)?;
        let username = request.username.trim().to_string();

        if self.user_repo.get_user_by_email(&email).await?.is_some() {
            return Err(ApiError::Conflict("Account already exists".to_string()));
        }
        if self.user_repo.get_user_by_username(&username).await?.is_some() {
            return Err(ApiError::Conflict("Username is already taken".to_string()));
        }

        let avatar = match gravatar_url(&email) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Error getting Gravatar for {}: {}", email, e);
                None
            }
        };

        let password_hash = hash_password(&request.password)?;
        let user = User::new(username, email, password_hash, avatar);
        self.user_repo.create_user(&user).await?;

        tracing::info!("User {} signed up", user.id);
        Ok(user)
    }

    /// Verify credentials, open a session and rotate the refresh token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<TokenResponse> {
        let email = validate_and_normalize_email(email)?;

        let user = match self.user_repo.get_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                metrics::counter!("auth_login_failures_total").increment(1);
                return Err(ApiError::Unauthorized);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            metrics::counter!("auth_login_failures_total").increment(1);
            tracing::info!("Failed login for user {}", user.id);
            return Err(ApiError::Unauthorized);
        }

        self.issue_tokens(&user).await
    }

    /// Exchange a refresh token for a new access/refresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenResponse> {
        let user = self
            .user_repo
            .get_user_by_refresh_token(refresh_token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if user.refresh_token_expired() {
            self.user_repo
                .update_refresh_token(&user.id, None, None)
                .await?;
            tracing::debug!("Refresh token expired for user {}", user.id);
            return Err(ApiError::Unauthorized);
        }

        self.issue_tokens(&user).await
    }

    /// Sign the user out everywhere: all sessions and the refresh token.
    pub async fn logout(&self, user_id: &str) -> ApiResult<()> {
        self.session_service.close_all_for_user(user_id).await?;
        self.user_repo
            .update_refresh_token(user_id, None, None)
            .await
    }

    async fn issue_tokens(&self, user: &User) -> ApiResult<TokenResponse> {
        let session = self.session_service.open(&user.id).await?;

        let refresh_token = generate_session_token();
        let refresh_expires_at = (chrono::Utc::now()
            + chrono::Duration::days(self.refresh_token_duration_days))
        .to_rfc3339();
        self.user_repo
            .update_refresh_token(&user.id, Some(&refresh_token), Some(&refresh_expires_at))
            .await?;

        Ok(TokenResponse::bearer(
            session.token,
            refresh_token,
            session.expires_at,
        ))
    }
}
