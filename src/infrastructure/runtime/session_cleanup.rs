use crate::application::services::SessionService;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Periodically delete expired sessions until the runtime shuts down.
pub fn spawn_session_cleanup(session_service: SessionService, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            if let Err(e) = session_service.purge_expired().await {
                tracing::error!("Session cleanup failed: {}", e);
            }
        }
    })
}
