use crate::{
    application::services::{AuthService, ContactService, SessionService, UserService},
    domain::entities::{Session, User},
    infrastructure::http::middleware::error::ApiError,
    infrastructure::persistence::Database,
};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub session_service: SessionService,
    pub contact_service: ContactService,
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthorized)
}

/// Extract and validate the session token from the Authorization header
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?.to_string();

    let session = state.session_service.authenticate(&token).await?;

    let user = state
        .user_service
        .get_user_by_id(&session.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(AuthenticatedUser {
        user,
        session,
        token,
    });

    Ok(next.run(request).await)
}

#[derive(Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub session: Session,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}
