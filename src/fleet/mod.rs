//! # Fleet Store
//!
//! Owns the set of monitored transformers. Records are kept in seed order and
//! are only ever mutated through [`FleetStore::update_status`], which clamps
//! temperature and load into their valid ranges.

pub mod seed;

pub use seed::{sample_fleet, sample_notifications};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::domain::{LoadPercent, Temperature, TransformerRecord, TransformerStatus};

/// Fleet-specific errors
#[derive(Debug, Error, PartialEq)]
pub enum FleetError {
    #[error("Transformer not found: {0}")]
    NotFound(String),
    #[error("Duplicate transformer id in seed: {0}")]
    DuplicateId(String),
    #[error("Invalid {field} reading for {id}: {value}")]
    InvalidReading {
        id: String,
        field: &'static str,
        value: f64,
    },
}

/// Per-status counts, recomputed from the records on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub healthy: usize,
    pub warning: usize,
    pub fault: usize,
    pub total: usize,
}

impl FleetSnapshot {
    pub fn count(&self, status: TransformerStatus) -> usize {
        match status {
            TransformerStatus::Healthy => self.healthy,
            TransformerStatus::Warning => self.warning,
            TransformerStatus::Fault => self.fault,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FleetStore {
    records: Vec<TransformerRecord>,
    index: HashMap<String, usize>,
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `seed`, see [`FleetStore::initialize`].
    pub fn with_seed(seed: Vec<TransformerRecord>) -> Result<Self, FleetError> {
        let mut store = Self::new();
        store.initialize(seed)?;
        Ok(store)
    }

    /// Replace all records with `seed`. On error the previous contents are kept.
    pub fn initialize(&mut self, seed: Vec<TransformerRecord>) -> Result<(), FleetError> {
        let mut index = HashMap::with_capacity(seed.len());
        for (pos, record) in seed.iter().enumerate() {
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(FleetError::DuplicateId(record.id.clone()));
            }
        }
        debug!(records = seed.len(), "fleet initialized");
        self.records = seed;
        self.index = index;
        Ok(())
    }

    pub fn list_all(&self) -> &[TransformerRecord] {
        &self.records
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Result<&TransformerRecord, FleetError> {
        self.index
            .get(id)
            .map(|&pos| &self.records[pos])
            .ok_or_else(|| FleetError::NotFound(id.to_string()))
    }

    /// Overwrite status and readings of one record, clamping the readings.
    pub fn update_status(
        &mut self,
        id: &str,
        status: TransformerStatus,
        temperature_c: f64,
        load_percent: f64,
    ) -> Result<&TransformerRecord, FleetError> {
        let pos = *self
            .index
            .get(id)
            .ok_or_else(|| FleetError::NotFound(id.to_string()))?;

        if !temperature_c.is_finite() {
            return Err(FleetError::InvalidReading {
                id: id.to_string(),
                field: "temperature",
                value: temperature_c,
            });
        }
        if !load_percent.is_finite() {
            return Err(FleetError::InvalidReading {
                id: id.to_string(),
                field: "load",
                value: load_percent,
            });
        }

        let record = &mut self.records[pos];
        record.status = status;
        record.temperature = Temperature::celsius(temperature_c);
        record.load = LoadPercent::percent(load_percent);
        debug!(
            transformer_id = %record.id,
            status = %record.status,
            temperature_c = record.temperature.as_celsius(),
            load_percent = record.load.as_percent(),
            "transformer updated"
        );
        Ok(record)
    }

    pub fn compute_stats(&self) -> FleetSnapshot {
        let mut snapshot = FleetSnapshot {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.status {
                TransformerStatus::Healthy => snapshot.healthy += 1,
                TransformerStatus::Warning => snapshot.warning += 1,
                TransformerStatus::Fault => snapshot.fault += 1,
            }
        }
        snapshot
    }
}
