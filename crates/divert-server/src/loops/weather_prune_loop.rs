//! Evicts stale weather snapshots so ranking never reads an old observation.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::interval;

use crate::state::AppState;

pub async fn run_weather_prune_loop(state: Arc<AppState>, mut shutdown: broadcast::Receiver<()>) {
    let period = Duration::from_secs(state.config().weather_prune_interval_s.max(1));
    let mut ticker = interval(period);

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Weather prune loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let removed = state.prune_weather();
                if removed > 0 {
                    tracing::debug!("Pruned {} weather snapshot(s)", removed);
                }
            }
        }
    }
}
