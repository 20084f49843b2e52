//! # Telemetry Simulation Module
//!
//! Stand-ins for the live inputs a real monitoring deployment would have.
//!
//! ## Components
//!
//! - **Status**: random status/temperature/load drift across the fleet
//! - **FRA**: synthetic frequency-response sweeps for the chart view
//! - **Feed**: scripted data-feed session log
//!
//! ## Usage
//!
//! ```rust
//! use transformer_diagnostics::fleet::{sample_fleet, FleetStore};
//! use transformer_diagnostics::simulation::{StatusSimulator, StatusSimulatorConfig};
//!
//! let mut fleet = FleetStore::with_seed(sample_fleet()).unwrap();
//! let mut sim = StatusSimulator::new(&StatusSimulatorConfig::seeded(42)).unwrap();
//!
//! let report = sim.tick(&mut fleet).unwrap();
//! assert_eq!(fleet.compute_stats().total, 5);
//! # let _ = report;
//! ```

pub mod feed;
pub mod fra;
pub mod status;

pub use feed::{DataFeed, FeedLogEntry, FeedStatus};
pub use fra::{FraChart, FraChartOptions, FraGenerator, FraSeries};
pub use status::{SimulationError, StatusSimulator, StatusSimulatorConfig, TickReport};
