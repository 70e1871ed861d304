//! Periodic removal of expired login codes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Spawn the sweeper. It runs until the returned handle is aborted.
pub fn spawn_otp_sweeper(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = state.auth.purge_expired_codes(Utc::now()).await {
                tracing::warn!(error = %e, "Login code sweep failed");
            }
        }
    })
}
