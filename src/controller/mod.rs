pub mod dashboard;
pub mod refresh;
pub mod uploads;

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::session::{FileSessionStore, SessionStore};

pub use dashboard::{AnalysisResult, Dashboard, DashboardError, RefreshOutcome, View};
pub use refresh::spawn_refresh_loop;
pub use uploads::{UploadSummary, UploadedFile};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub dashboard: Arc<RwLock<Dashboard>>,
    pub shutdown: CancellationToken,
}

impl AppState {
    /// State backed by the file session store from `cfg.session`, with any
    /// previously persisted login restored.
    pub async fn new(cfg: Config) -> Result<Self> {
        let store: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(cfg.session.store_path.clone()));
        Self::with_session_store(cfg, store).await
    }

    pub async fn with_session_store(cfg: Config, store: Arc<dyn SessionStore>) -> Result<Self> {
        let mut dashboard = Dashboard::new(&cfg, store)?;
        if let Some(session) = dashboard.restore_session().await? {
            info!(username = %session.username, "resuming previous session");
        }

        Ok(Self {
            cfg,
            dashboard: Arc::new(RwLock::new(dashboard)),
            shutdown: CancellationToken::new(),
        })
    }
}

/// Start background tasks; they stop when `state.shutdown` is cancelled.
pub fn spawn_controller_tasks(state: &AppState) -> JoinHandle<()> {
    spawn_refresh_loop(
        state.dashboard.clone(),
        state.cfg.dashboard.refresh_interval(),
        state.shutdown.child_token(),
    )
}
