//! Background task replacing the manual "tidy the database" chore: every
//! interval tick, expired rooms and their QR files are removed.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{task::JoinHandle, time};

use crate::{services::ServiceContext, state::AppState};

/// Spawn the cleanup loop. Call once at startup.
pub fn spawn(state: Arc<AppState>) -> JoinHandle<()> {
    let interval = Duration::from_secs(state.config.room.cleanup_interval_secs);
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        // The first tick fires immediately and sweeps leftovers from the
        // previous run.
        loop {
            ticker.tick().await;
            let rooms = ServiceContext::from_state(&state).room();
            match rooms.remove_expired(Utc::now().fixed_offset()).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(rooms = removed, "cleanup pass finished"),
                Err(err) => tracing::error!("room cleanup failed: {err}"),
            }
        }
    })
}
