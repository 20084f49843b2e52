//! # Dashboard
//!
//! The single logical owner of all dashboard state. Every UI action maps to
//! one method here; callers serialize access (the service keeps the
//! dashboard behind one `RwLock`), so call order is effect order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::uploads::{UploadSummary, UploadedFile};
use crate::config::Config;
use crate::diagnostics::{Diagnosis, DiagnosticClassifier};
use crate::domain::{NotificationEvent, NotificationKind, TransformerRecord, TransformerStatus};
use crate::fleet::{sample_fleet, sample_notifications, FleetError, FleetSnapshot, FleetStore};
use crate::notifications::NotificationFeed;
use crate::reports::{
    exporter_for, DiagnosticReport, ReportArtifact, ReportError, ReportExporter, ReportFormat,
    ReportHistory, ReportHistoryEntry,
};
use crate::session::{SessionError, SessionManager, SessionStore, UserSession};
use crate::simulation::{
    DataFeed, FeedLogEntry, FeedStatus, FraChart, FraChartOptions, FraGenerator, SimulationError,
    StatusSimulator, TickReport,
};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("No transformer selected")]
    InvalidSelection,
    #[error("No files selected")]
    NoFilesSelected,
    #[error(transparent)]
    Fleet(#[from] FleetError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Top-level pages of the dashboard UI.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum View {
    #[default]
    Dashboard,
    Upload,
    Analysis,
    Visualization,
    Reports,
    DataFeed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshOutcome {
    pub snapshot: FleetSnapshot,
    pub changed: Vec<String>,
    pub refreshed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub transformer_id: String,
    pub status: TransformerStatus,
    pub diagnosis: Diagnosis,
}

pub struct Dashboard {
    fleet: FleetStore,
    notifications: NotificationFeed,
    simulator: StatusSimulator,
    classifier: DiagnosticClassifier,
    fra: FraGenerator,
    feed: DataFeed,
    reports: ReportHistory,
    sessions: SessionManager,
    view: View,
    last_refresh: Option<DateTime<Utc>>,
    refresh_count: u64,
}

impl Dashboard {
    /// Dashboard over the built-in sample fleet and seed notifications.
    pub fn new(cfg: &Config, store: Arc<dyn SessionStore>) -> Result<Self, DashboardError> {
        let fleet = FleetStore::with_seed(sample_fleet())?;
        let mut notifications =
            NotificationFeed::with_capacity(cfg.dashboard.notification_capacity);
        notifications.seed(sample_notifications(Utc::now()));

        let simulator = StatusSimulator::new(&cfg.simulation)?;
        // offset so chart noise does not mirror the drift sequence
        let fra = FraGenerator::new(cfg.simulation.random_seed.map(|s| s.wrapping_add(1)));

        Ok(Self {
            fleet,
            notifications,
            simulator,
            classifier: DiagnosticClassifier,
            fra,
            feed: DataFeed::default(),
            reports: ReportHistory::with_capacity(cfg.dashboard.report_history_capacity),
            sessions: SessionManager::new(store),
            view: View::default(),
            last_refresh: None,
            refresh_count: 0,
        })
    }

    /// Replace the fleet with `seed`.
    pub fn load_fleet(&mut self, seed: Vec<TransformerRecord>) -> Result<(), DashboardError> {
        self.fleet.initialize(seed)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Session & navigation
    // ------------------------------------------------------------------

    pub async fn restore_session(&mut self) -> Result<Option<UserSession>, DashboardError> {
        Ok(self.sessions.restore().await?.cloned())
    }

    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<UserSession, DashboardError> {
        let session = self.sessions.login(username, password, Utc::now()).await?.clone();
        self.view = View::Dashboard;
        Ok(session)
    }

    pub async fn logout(&mut self) -> Result<UserSession, DashboardError> {
        Ok(self.sessions.logout().await?)
    }

    pub fn current_user(&self) -> Option<&UserSession> {
        self.sessions.current()
    }

    pub fn is_logged_in(&self) -> bool {
        self.sessions.is_logged_in()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn navigate(&mut self, view: View) {
        if self.view != view {
            info!(from = %self.view, to = %view, "navigate");
        }
        self.view = view;
    }

    // ------------------------------------------------------------------
    // Fleet queries & updates
    // ------------------------------------------------------------------

    pub fn transformers(&self) -> &[TransformerRecord] {
        self.fleet.list_all()
    }

    pub fn transformer(&self, id: &str) -> Result<&TransformerRecord, DashboardError> {
        Ok(self.fleet.find_by_id(id)?)
    }

    /// Resolve a user selection; a blank id is `InvalidSelection`.
    pub fn selected(&self, transformer_id: &str) -> Result<&TransformerRecord, DashboardError> {
        select(&self.fleet, transformer_id)
    }

    pub fn update_status(
        &mut self,
        id: &str,
        status: TransformerStatus,
        temperature_c: f64,
        load_percent: f64,
    ) -> Result<&TransformerRecord, DashboardError> {
        Ok(self
            .fleet
            .update_status(id, status, temperature_c, load_percent)?)
    }

    pub fn stats(&self) -> FleetSnapshot {
        self.fleet.compute_stats()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    // ------------------------------------------------------------------
    // Refresh cycle
    // ------------------------------------------------------------------

    /// Simulator tick followed by a fresh snapshot.
    pub fn refresh(&mut self) -> Result<RefreshOutcome, DashboardError> {
        let TickReport { changed } = self.simulator.tick(&mut self.fleet)?;
        let snapshot = self.fleet.compute_stats();
        let refreshed_at = Utc::now();
        self.last_refresh = Some(refreshed_at);
        self.refresh_count += 1;

        info!(
            healthy = snapshot.healthy,
            warning = snapshot.warning,
            fault = snapshot.fault,
            total = snapshot.total,
            changed = changed.len(),
            "dashboard refreshed"
        );
        Ok(RefreshOutcome {
            snapshot,
            changed,
            refreshed_at,
        })
    }

    /// Whether the periodic refresh should run right now.
    pub fn auto_refresh_enabled(&self) -> bool {
        self.sessions.is_logged_in() && self.view == View::Dashboard
    }

    /// Periodic refresh entry point; `None` when gated off.
    pub fn auto_refresh(&mut self) -> Result<Option<RefreshOutcome>, DashboardError> {
        if !self.auto_refresh_enabled() {
            return Ok(None);
        }
        self.refresh().map(Some)
    }

    // ------------------------------------------------------------------
    // Analysis & visualization
    // ------------------------------------------------------------------

    /// Classify one transformer. A fault raises an error notification.
    pub fn run_analysis(&mut self, transformer_id: &str) -> Result<AnalysisResult, DashboardError> {
        let record = select(&self.fleet, transformer_id)?;
        let diagnosis = self.classifier.classify(record);
        let result = AnalysisResult {
            transformer_id: record.id.clone(),
            status: record.status,
            diagnosis,
        };

        info!(
            transformer_id = %result.transformer_id,
            fault_type = %result.diagnosis.fault_type,
            severity = %result.diagnosis.severity,
            "analysis complete"
        );
        if result.status == TransformerStatus::Fault {
            self.notifications.append(
                NotificationKind::Error,
                "Critical Fault Detected",
                format!("Transformer {} requires immediate attention", result.transformer_id),
            );
        }
        Ok(result)
    }

    pub fn fra_chart(
        &mut self,
        transformer_id: &str,
        options: FraChartOptions,
    ) -> Result<FraChart, DashboardError> {
        let record = select(&self.fleet, transformer_id)?;
        Ok(self.fra.sweep(record, options))
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub fn generate_report(
        &mut self,
        transformer_id: &str,
        report_type: &str,
        format: ReportFormat,
    ) -> Result<ReportArtifact, DashboardError> {
        let exporter = exporter_for(format);
        self.generate_report_with(exporter.as_ref(), transformer_id, report_type)
    }

    pub fn generate_report_with(
        &mut self,
        exporter: &dyn ReportExporter,
        transformer_id: &str,
        report_type: &str,
    ) -> Result<ReportArtifact, DashboardError> {
        let record = select(&self.fleet, transformer_id)?;
        let now = Utc::now();
        let report = DiagnosticReport::build(record, report_type, now.date_naive())?;
        let artifact = exporter.export(&report)?;

        info!(
            transformer_id = %report.transformer_id,
            report_type = %report.report_type,
            file_name = %artifact.file_name,
            "report generated"
        );
        self.reports.record(ReportHistoryEntry {
            id: Uuid::new_v4(),
            transformer_id: report.transformer_id,
            report_type: report.report_type,
            format: artifact.format,
            file_name: artifact.file_name.clone(),
            generated_at: now,
        });
        Ok(artifact)
    }

    pub fn report_history(&self) -> &[ReportHistoryEntry] {
        self.reports.entries()
    }

    // ------------------------------------------------------------------
    // Data feed & uploads
    // ------------------------------------------------------------------

    pub fn start_data_feed(&mut self, now: DateTime<Utc>) -> Vec<FeedLogEntry> {
        let log = self.feed.connect(now).to_vec();
        self.notifications.append(
            NotificationKind::Info,
            "Data Feed Active",
            "Automatic data collection is now active",
        );
        log
    }

    pub fn feed_status(&self) -> FeedStatus {
        self.feed.status()
    }

    pub fn feed_log(&self) -> &[FeedLogEntry] {
        self.feed.log()
    }

    pub fn process_uploads(
        &mut self,
        files: &[UploadedFile],
    ) -> Result<Vec<UploadSummary>, DashboardError> {
        if files.is_empty() {
            warn!("upload processing requested with no files");
            return Err(DashboardError::NoFilesSelected);
        }
        let summaries: Vec<UploadSummary> = files.iter().map(UploadSummary::from).collect();
        info!(files = summaries.len(), "FRA files processed");
        self.notifications.append(
            NotificationKind::Info,
            "Data Processing Complete",
            "New FRA data available for analysis",
        );
        Ok(summaries)
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> &NotificationEvent {
        self.notifications.append(kind, title, message)
    }

    pub fn mark_notifications_read(&mut self) {
        self.notifications.mark_all_read();
    }
}

fn select<'a>(
    fleet: &'a FleetStore,
    transformer_id: &str,
) -> Result<&'a TransformerRecord, DashboardError> {
    let id = transformer_id.trim();
    if id.is_empty() {
        return Err(DashboardError::InvalidSelection);
    }
    Ok(fleet.find_by_id(id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::session::MemorySessionStore;
    use crate::simulation::StatusSimulatorConfig;
    use std::str::FromStr;

    fn config(seed: u64) -> Config {
        Config {
            dashboard: DashboardConfig::instant(),
            simulation: StatusSimulatorConfig::seeded(seed),
            ..Default::default()
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(&config(42), Arc::new(MemorySessionStore::default())).unwrap()
    }

    #[test]
    fn test_new_dashboard_seeded() {
        let d = dashboard();
        assert_eq!(d.transformers().len(), 5);
        assert_eq!(d.notifications().count(), 3);
        assert_eq!(d.view(), View::Dashboard);
        assert!(d.last_refresh().is_none());
    }

    #[test]
    fn test_analysis_of_fault_raises_error_notification() {
        let mut d = dashboard();
        let before = d.notifications().count();

        let result = d.run_analysis("T003").unwrap();
        assert_eq!(result.diagnosis.fault_type, "Winding Deformation Detected");

        assert_eq!(d.notifications().count(), before + 1);
        let latest = d.notifications().latest().unwrap();
        assert_eq!(latest.kind, NotificationKind::Error);
        assert_eq!(latest.title, "Critical Fault Detected");
        assert!(latest.message.contains("T003"));
    }

    #[test]
    fn test_analysis_of_healthy_is_silent() {
        let mut d = dashboard();
        let before = d.notifications().count();
        let result = d.run_analysis("T001").unwrap();
        assert_eq!(result.diagnosis.fault_type, "No significant faults detected");
        assert_eq!(d.notifications().count(), before);
    }

    #[test]
    fn test_analysis_requires_selection() {
        let mut d = dashboard();
        assert!(matches!(d.run_analysis("  "), Err(DashboardError::InvalidSelection)));
        assert!(matches!(
            d.run_analysis("T404"),
            Err(DashboardError::Fleet(FleetError::NotFound(_)))
        ));
    }

    #[test]
    fn test_selected_trims_and_rejects_blank() {
        let d = dashboard();
        assert_eq!(d.selected(" T002 ").unwrap().id, "T002");
        assert!(matches!(d.selected(" "), Err(DashboardError::InvalidSelection)));
        assert!(matches!(
            d.selected("T404"),
            Err(DashboardError::Fleet(FleetError::NotFound(_)))
        ));
    }

    #[test]
    fn test_refresh_updates_counters() {
        let mut d = dashboard();
        let outcome = d.refresh().unwrap();
        assert_eq!(outcome.snapshot.total, 5);
        assert_eq!(d.refresh_count(), 1);
        assert_eq!(d.last_refresh(), Some(outcome.refreshed_at));
    }

    #[tokio::test]
    async fn test_auto_refresh_gated_by_session_and_view() {
        let mut d = dashboard();
        assert!(d.auto_refresh().unwrap().is_none());

        d.login("operator", "secret").await.unwrap();
        assert!(d.auto_refresh().unwrap().is_some());

        d.navigate(View::Reports);
        assert!(d.auto_refresh().unwrap().is_none());

        d.navigate(View::Dashboard);
        d.logout().await.unwrap();
        assert!(d.auto_refresh().unwrap().is_none());
        assert_eq!(d.refresh_count(), 1);
    }

    #[tokio::test]
    async fn test_login_returns_to_dashboard_view() {
        let mut d = dashboard();
        d.navigate(View::Visualization);
        let session = d.login("op", "pw").await.unwrap();
        assert_eq!(session.username, "op");
        assert_eq!(d.view(), View::Dashboard);
        assert_eq!(d.current_user().map(|u| u.username.as_str()), Some("op"));
    }

    #[test]
    fn test_generate_report_records_history() {
        let mut d = dashboard();
        let artifact = d
            .generate_report("T002", "Maintenance", ReportFormat::Spreadsheet)
            .unwrap();
        assert_eq!(artifact.file_name, "T002_diagnostic_report.csv");

        let history = d.report_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].heading(), "T002 - Maintenance Report");
        assert_eq!(history[0].format, ReportFormat::Spreadsheet);
    }

    #[test]
    fn test_failed_report_leaves_history_untouched() {
        let mut d = dashboard();
        assert!(matches!(
            d.generate_report("", "Maintenance", ReportFormat::Document),
            Err(DashboardError::InvalidSelection)
        ));
        assert!(matches!(
            d.generate_report("T001", "", ReportFormat::Document),
            Err(DashboardError::Report(ReportError::MissingReportType))
        ));
        assert!(d.report_history().is_empty());
    }

    #[test]
    fn test_data_feed_goes_online_and_notifies() {
        let mut d = dashboard();
        assert_eq!(d.feed_status(), FeedStatus::Offline);
        let log = d.start_data_feed(Utc::now());
        assert_eq!(log.len(), 5);
        assert_eq!(d.feed_status(), FeedStatus::Online);
        assert_eq!(d.feed_log(), log.as_slice());
        assert_eq!(d.notifications().latest().unwrap().title, "Data Feed Active");
    }

    #[test]
    fn test_load_fleet_replaces_records() {
        let mut d = dashboard();
        let mut seed = sample_fleet();
        seed.truncate(2);
        d.load_fleet(seed).unwrap();
        assert_eq!(d.stats().total, 2);

        let mut dup = sample_fleet();
        dup[1].id = dup[0].id.clone();
        assert!(matches!(
            d.load_fleet(dup),
            Err(DashboardError::Fleet(FleetError::DuplicateId(_)))
        ));
        assert_eq!(d.transformers().len(), 2);
    }

    #[test]
    fn test_process_uploads() {
        let mut d = dashboard();
        assert!(matches!(d.process_uploads(&[]), Err(DashboardError::NoFilesSelected)));

        let files = vec![UploadedFile {
            name: "sweep.csv".to_string(),
            size_bytes: 2048,
        }];
        let summaries = d.process_uploads(&files).unwrap();
        assert_eq!(summaries[0].size, "2.00 KB");
        assert_eq!(
            d.notifications().latest().unwrap().message,
            "New FRA data available for analysis"
        );
    }

    #[test]
    fn test_fra_chart_for_selected_transformer() {
        let mut d = dashboard();
        let chart = d.fra_chart("T002", FraChartOptions::default()).unwrap();
        assert_eq!(chart.transformer_id, "T002");
        assert_eq!(chart.series.len(), 2);
        assert!(d.fra_chart("", FraChartOptions::default()).is_err());
    }

    #[test]
    fn test_mark_notifications_read() {
        let mut d = dashboard();
        d.notify(NotificationKind::Warning, "Manual", "check");
        assert_eq!(d.notifications().unread_count(), 4);
        d.mark_notifications_read();
        assert_eq!(d.notifications().unread_count(), 0);
    }

    #[test]
    fn test_view_parsing() {
        assert_eq!(View::from_str("data_feed").unwrap(), View::DataFeed);
        assert_eq!(View::Visualization.to_string(), "visualization");
        assert!(View::from_str("settings").is_err());
    }
}
