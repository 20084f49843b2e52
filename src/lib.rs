pub mod api;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod domain;
pub mod fleet;
pub mod notifications;
pub mod reports;
pub mod session;
pub mod simulation;
pub mod telemetry;
