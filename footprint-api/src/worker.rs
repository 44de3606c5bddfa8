use std::sync::Arc;
use tokio::time::{interval, Duration};
use footprint_store::SessionStore;
use tracing::{debug, info};

/// Periodically drop idle sessions. Runs until the runtime shuts down.
pub async fn start_session_sweeper(sessions: Arc<SessionStore>, every: Duration) {
    let mut ticker = interval(every);
    info!("Session sweeper started, running every {:?}", every);

    loop {
        ticker.tick().await;
        let removed = sessions.purge_idle(chrono::Utc::now()).await;
        debug!("Session sweep removed {} sessions, {} live", removed, sessions.len().await);
    }
}
