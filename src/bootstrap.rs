use crate::application::services::*;
use crate::config::Config;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::contact_repository::ContactRepository;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use crate::infrastructure::runtime::clock::SystemClock;
use crate::infrastructure::runtime::session_cleanup::spawn_session_cleanup;
use std::sync::Arc;
use std::time::Duration;

/// Wire repositories and services, without background tasks.
pub fn build_services(db: Database, config: &Config, clock: Arc<dyn Clock>) -> AppState {
    let user_repo: Arc<dyn UserRepository> = Arc::new(db.clone());
    let session_repo: Arc<dyn SessionRepository> = Arc::new(db.clone());
    let contact_repo: Arc<dyn ContactRepository> = Arc::new(db.clone());

    let session_service = SessionService::new(session_repo, config.session_duration_hours);
    let user_service = UserService::new(user_repo.clone());
    let auth_service = AuthService::new(
        user_repo,
        session_service.clone(),
        config.refresh_token_duration_days,
    );
    let contact_service = ContactService::new(contact_repo, clock);

    AppState {
        db,
        auth_service,
        user_service,
        session_service,
        contact_service,
    }
}

pub async fn build_app_state(
    db: Database,
    config: &Config,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let state = build_services(db, config, Arc::new(SystemClock));
    tracing::info!("Services initialized");

    spawn_session_cleanup(
        state.session_service.clone(),
        Duration::from_secs(config.session_cleanup_interval_secs),
    );
    tracing::info!(
        "Session cleanup scheduled every {}s",
        config.session_cleanup_interval_secs
    );

    Ok(state)
}
