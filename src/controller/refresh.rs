use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::Dashboard;

/// Periodic dashboard refresh. Each tick calls [`Dashboard::auto_refresh`],
/// which is a no-op unless a user is logged in and looking at the dashboard
/// view. The loop ends when `cancel` fires.
pub fn spawn_refresh_loop(
    dashboard: Arc<RwLock<Dashboard>>,
    every: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = every.as_secs(), "refresh loop started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let mut dashboard = dashboard.write().await;
                    match dashboard.auto_refresh() {
                        Ok(Some(outcome)) => {
                            debug!(changed = outcome.changed.len(), "auto refresh")
                        }
                        Ok(None) => debug!(view = %dashboard.view(), "auto refresh skipped"),
                        Err(e) => warn!(error = %e, "auto refresh failed"),
                    }
                }
            }
        }

        info!("refresh loop stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DashboardConfig};
    use crate::controller::View;
    use crate::session::MemorySessionStore;
    use crate::simulation::StatusSimulatorConfig;

    fn shared_dashboard() -> Arc<RwLock<Dashboard>> {
        let cfg = Config {
            dashboard: DashboardConfig::instant(),
            simulation: StatusSimulatorConfig::seeded(1),
            ..Default::default()
        };
        let dashboard = Dashboard::new(&cfg, Arc::new(MemorySessionStore::default())).unwrap();
        Arc::new(RwLock::new(dashboard))
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_runs_only_on_active_dashboard() {
        let dashboard = shared_dashboard();
        dashboard.write().await.login("op", "pw").await.unwrap();

        let cancel = CancellationToken::new();
        let handle = spawn_refresh_loop(dashboard.clone(), Duration::from_secs(30), cancel.clone());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(dashboard.read().await.refresh_count(), 0);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(dashboard.read().await.refresh_count(), 2);

        dashboard.write().await.navigate(View::Analysis);
        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(dashboard.read().await.refresh_count(), 2);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_skipped_without_session() {
        let dashboard = shared_dashboard();
        let cancel = CancellationToken::new();
        let handle = spawn_refresh_loop(dashboard.clone(), Duration::from_secs(30), cancel.clone());

        tokio::time::sleep(Duration::from_secs(95)).await;
        assert_eq!(dashboard.read().await.refresh_count(), 0);

        cancel.cancel();
        handle.await.unwrap();
    }
}
