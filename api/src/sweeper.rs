//! Background task that terminates sessions left open past the stale threshold.
//!
//! The task holds no state of its own; every tick re-reads the session log table, so
//! a restart just picks up again on the next tick.

use chrono::{DateTime, Utc};
use db::{AppResult, models::session_log::Model as SessionLogModel};
use sea_orm::DatabaseConnection;
use std::time::Duration;
use tokio::task::JoinHandle;
use util::config;

/// Runs one sweep at `now` with the configured threshold.
pub async fn run_once(db: &DatabaseConnection, now: DateTime<Utc>) -> AppResult<u64> {
    SessionLogModel::sweep_stale(db, now, config::stale_session_hours()).await
}

/// Spawns the periodic sweep. The first tick fires immediately.
pub fn spawn_session_sweeper(db: DatabaseConnection) -> JoinHandle<()> {
    let period = Duration::from_secs(config::session_sweep_interval_secs().max(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match run_once(&db, Utc::now()).await {
                Ok(0) => tracing::debug!("session sweep: nothing stale"),
                Ok(n) => tracing::info!(terminated = n, "session sweep terminated stale sessions"),
                Err(e) => tracing::warn!(error = %e, "session sweep failed"),
            }
        }
    })
}
