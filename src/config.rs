use anyhow::Result;
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::simulation::StatusSimulatorConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    pub simulation: StatusSimulatorConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Auto-refresh period while the dashboard view is active
    pub refresh_interval_seconds: u64,
    /// Oldest notifications are evicted beyond this many
    pub notification_capacity: usize,
    /// Oldest report-history entries are dropped beyond this many
    pub report_history_capacity: usize,
    /// Simulated processing time before a manual refresh completes
    pub refresh_delay_ms: u64,
    /// Simulated processing time before an analysis result is available
    pub analysis_delay_ms: u64,
    /// Simulated processing time before a report is produced
    pub report_delay_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: 30,
            notification_capacity: crate::notifications::DEFAULT_CAPACITY,
            report_history_capacity: crate::reports::DEFAULT_HISTORY_CAPACITY,
            refresh_delay_ms: 1500,
            analysis_delay_ms: 3000,
            report_delay_ms: 2000,
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds.max(1))
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn report_delay(&self) -> Duration {
        Duration::from_millis(self.report_delay_ms)
    }

    /// No simulated delays; for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            refresh_delay_ms: 0,
            analysis_delay_ms: 0,
            report_delay_ms: 0,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the persisted login record
    pub store_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/session.json"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::figment().extract().map_err(Into::into)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("TXD__").split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.dashboard.refresh_interval(), Duration::from_secs(30));
        assert_eq!(cfg.dashboard.notification_capacity, 200);
        assert_eq!(cfg.dashboard.report_history_capacity, 100);
        assert_eq!(cfg.simulation.change_probability, 0.10);
        assert!(cfg.simulation.random_seed.is_none());
        assert_eq!(cfg.server.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_instant_has_no_delays() {
        let dashboard = DashboardConfig::instant();
        assert_eq!(dashboard.analysis_delay(), Duration::ZERO);
        assert_eq!(dashboard.refresh_interval_seconds, 30);
    }

    #[test]
    fn test_toml_and_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/default.toml",
                r#"
                [server]
                port = 9000

                [simulation]
                change_probability = 0.25
                random_seed = 7
                "#,
            )?;
            jail.set_env("TXD__DASHBOARD__REFRESH_INTERVAL_SECONDS", "5");

            let cfg = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.port, 9000);
            assert_eq!(cfg.server.host, "127.0.0.1");
            assert_eq!(cfg.simulation.change_probability, 0.25);
            assert_eq!(cfg.simulation.random_seed, Some(7));
            assert_eq!(cfg.dashboard.refresh_interval_seconds, 5);
            assert_eq!(cfg.dashboard.analysis_delay_ms, 3000);
            Ok(())
        });
    }
}
