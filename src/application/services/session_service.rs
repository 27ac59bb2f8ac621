use crate::application::services::auth::generate_session_token;
use crate::domain::entities::Session;
use crate::domain::ports::session_repository::SessionRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use std::sync::Arc;

/// Access-token sessions: issuing, validating and expiring them.
#[derive(Clone)]
pub struct SessionService {
    session_repo: Arc<dyn SessionRepository>,
    duration_hours: i64,
}

impl SessionService {
    pub fn new(session_repo: Arc<dyn SessionRepository>, duration_hours: i64) -> Self {
        Self {
            session_repo,
            duration_hours,
        }
    }

    /// Start a session with a fresh random token.
    pub async fn open(&self, user_id: &str) -> ApiResult<Session> {
        let session = Session::new(
            user_id.to_string(),
            generate_session_token(),
            self.duration_hours,
        );
        self.session_repo.create_session(&session).await?;

        tracing::debug!(
            "Opened session {} for user {} until {}",
            session.id,
            user_id,
            session.expires_at
        );
        Ok(session)
    }

    /// Resolve a bearer token to a live session.
    ///
    /// Unknown tokens are rejected. Expired sessions are deleted on sight and
    /// rejected. A live session has its last-accessed time refreshed; failing
    /// to record that does not fail the request.
    pub async fn authenticate(&self, token: &str) -> ApiResult<Session> {
        let session = self
            .session_repo
            .get_session_by_token(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if session.is_expired() {
            if let Err(e) = self.session_repo.delete_session(token).await {
                tracing::warn!("Failed to delete expired session {}: {}", session.id, e);
            }
            tracing::debug!("Rejected expired session for user {}", session.user_id);
            return Err(ApiError::Unauthorized);
        }

        if let Err(e) = self.session_repo.update_session_last_accessed(token).await {
            tracing::debug!("Could not touch session {}: {}", session.id, e);
        }

        Ok(session)
    }

    pub async fn close(&self, token: &str) -> ApiResult<()> {
        self.session_repo.delete_session(token).await
    }

    /// End every session of a user, on every device.
    pub async fn close_all_for_user(&self, user_id: &str) -> ApiResult<u64> {
        let removed = self.session_repo.delete_user_sessions(user_id).await?;
        tracing::info!("Closed {} sessions for user {}", removed, user_id);
        Ok(removed)
    }

    pub async fn purge_expired(&self) -> ApiResult<u64> {
        let removed = self.session_repo.cleanup_expired_sessions().await?;
        if removed > 0 {
            tracing::info!("Removed {} expired sessions", removed);
        }
        Ok(removed)
    }
}
