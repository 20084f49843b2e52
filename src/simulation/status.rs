//! # Status Drift Simulation
//!
//! Emulates live telemetry by randomly re-rolling transformer status and
//! nudging temperature/load. Each record is considered independently on every
//! tick; all writes go through [`FleetStore::update_status`] so clamping is
//! applied in one place.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution, Uniform};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::TransformerStatus;
use crate::fleet::{FleetError, FleetStore};

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Change probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("Jitter must be finite and non-negative, got {0}")]
    InvalidJitter(f64),
    #[error(transparent)]
    Fleet(#[from] FleetError),
}

/// Status simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSimulatorConfig {
    /// Probability that a given record changes on a tick (0.0-1.0)
    pub change_probability: f64,
    /// Temperature drift is drawn from [-jitter, +jitter] °C
    pub temperature_jitter_c: f64,
    /// Load drift is drawn from [-jitter, +jitter] percentage points
    pub load_jitter_percent: f64,
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
}

impl Default for StatusSimulatorConfig {
    fn default() -> Self {
        Self {
            change_probability: 0.10,
            temperature_jitter_c: 5.0,
            load_jitter_percent: 10.0,
            random_seed: None,
        }
    }
}

impl StatusSimulatorConfig {
    /// Seeded default configuration, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            random_seed: Some(seed),
            ..Default::default()
        }
    }
}

/// Outcome of one simulator tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Ids of the records that were re-rolled this tick, in fleet order
    pub changed: Vec<String>,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.changed.is_empty()
    }
}

pub struct StatusSimulator<R: Rng = StdRng> {
    change: Bernoulli,
    temperature_delta: Uniform<f64>,
    load_delta: Uniform<f64>,
    rng: R,
}

impl StatusSimulator<StdRng> {
    /// Create a simulator seeded from `config.random_seed`, or from entropy.
    pub fn new(config: &StatusSimulatorConfig) -> Result<Self, SimulationError> {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> StatusSimulator<R> {
    /// Create a simulator drawing from an injected random source.
    pub fn with_rng(config: &StatusSimulatorConfig, rng: R) -> Result<Self, SimulationError> {
        let change = Bernoulli::new(config.change_probability)
            .map_err(|_| SimulationError::InvalidProbability(config.change_probability))?;
        let temperature_delta = symmetric(config.temperature_jitter_c)?;
        let load_delta = symmetric(config.load_jitter_percent)?;

        Ok(Self {
            change,
            temperature_delta,
            load_delta,
            rng,
        })
    }

    /// Run one drift pass over the whole fleet.
    pub fn tick(&mut self, fleet: &mut FleetStore) -> Result<TickReport, SimulationError> {
        let mut report = TickReport::default();

        for id in fleet.ids() {
            if !self.change.sample(&mut self.rng) {
                continue;
            }

            let (temperature, load) = {
                let record = fleet.find_by_id(&id)?;
                (record.temperature.as_celsius(), record.load.as_percent())
            };
            let status = *TransformerStatus::ALL
                .choose(&mut self.rng)
                .unwrap_or(&TransformerStatus::Healthy);
            let temperature = temperature + self.temperature_delta.sample(&mut self.rng);
            let load = load + self.load_delta.sample(&mut self.rng);

            let updated = fleet.update_status(&id, status, temperature, load)?;
            debug!(
                transformer_id = %id,
                status = %updated.status,
                temperature_c = updated.temperature.as_celsius(),
                load_percent = updated.load.as_percent(),
                "simulated drift"
            );
            report.changed.push(id);
        }

        if !report.is_quiet() {
            info!(changed = report.changed.len(), "status simulation tick");
        }
        Ok(report)
    }
}

fn symmetric(jitter: f64) -> Result<Uniform<f64>, SimulationError> {
    // the full span must be representable or `Uniform` panics
    if !jitter.is_finite() || jitter < 0.0 || !(2.0 * jitter).is_finite() {
        return Err(SimulationError::InvalidJitter(jitter));
    }
    Ok(Uniform::new_inclusive(-jitter, jitter))
}
