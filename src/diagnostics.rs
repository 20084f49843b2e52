//! # Diagnostic Classifier
//!
//! Canned FRA fault classification keyed on transformer status. Pure: the
//! caller decides what to do with a severe result (see
//! `controller::Dashboard::run_analysis`).

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::{TransformerRecord, TransformerStatus};

pub const ANALYSIS_CONFIDENCE_PERCENT: f64 = 94.2;
pub const ANALYSIS_BASIS: &str =
    "Based on FRA frequency response patterns and historical data comparison.";
pub const FOLLOW_UP_ACTIONS: [&str; 3] = [
    "Monitor temperature and load patterns",
    "Schedule follow-up FRA testing",
    "Review maintenance history",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub fault_type: String,
    pub severity: Severity,
    pub recommendation: String,
    pub confidence_percent: f64,
    pub basis: String,
    pub follow_up: Vec<String>,
}

impl Diagnosis {
    pub fn requires_attention(&self) -> bool {
        self.severity == Severity::Severe
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticClassifier;

impl DiagnosticClassifier {
    pub fn classify(&self, record: &TransformerRecord) -> Diagnosis {
        classify_status(record.status)
    }
}

pub fn classify_status(status: TransformerStatus) -> Diagnosis {
    let (fault_type, severity, recommendation) = match status {
        TransformerStatus::Fault => (
            "Winding Deformation Detected",
            Severity::Severe,
            "Immediate shutdown recommended. Schedule detailed inspection and repair.",
        ),
        TransformerStatus::Warning => (
            "Insulation Degradation",
            Severity::Moderate,
            "Monitor closely. Schedule maintenance within 30 days.",
        ),
        TransformerStatus::Healthy => (
            "No significant faults detected",
            Severity::Minor,
            "Continue normal operation. Next scheduled maintenance in 6 months.",
        ),
    };

    Diagnosis {
        fault_type: fault_type.to_string(),
        severity,
        recommendation: recommendation.to_string(),
        confidence_percent: ANALYSIS_CONFIDENCE_PERCENT,
        basis: ANALYSIS_BASIS.to_string(),
        follow_up: FOLLOW_UP_ACTIONS.iter().map(|s| s.to_string()).collect(),
    }
}
