//! # Diagnostic Reports
//!
//! A report is a flat, labelled view of one transformer at generation time.
//! Turning it into a file is the job of a [`ReportExporter`]; the crate ships
//! a plain-text document exporter and a CSV spreadsheet exporter.

pub mod exporter;
pub mod history;

pub use exporter::{exporter_for, CsvReportExporter, ReportExporter, TextReportExporter};
pub use history::{ReportHistory, ReportHistoryEntry, DEFAULT_HISTORY_CAPACITY};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::domain::TransformerRecord;

pub const REPORT_TITLE: &str = "Transformer Diagnostic Report";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report type must not be empty")]
    MissingReportType,
    #[error("Export failed: {0}")]
    Export(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    Document,
    Spreadsheet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub title: String,
    pub report_type: String,
    pub generated_on: NaiveDate,
    pub transformer_id: String,
    pub rows: Vec<ReportRow>,
}

impl DiagnosticReport {
    /// Capture `record` as it stands now. Only reads the record.
    pub fn build(
        record: &TransformerRecord,
        report_type: &str,
        generated_on: NaiveDate,
    ) -> Result<Self, ReportError> {
        let report_type = report_type.trim();
        if report_type.is_empty() {
            return Err(ReportError::MissingReportType);
        }

        let row = |label: &str, value: String| ReportRow {
            label: label.to_string(),
            value,
        };
        let rows = vec![
            row("ID", record.id.clone()),
            row("Name", record.name.clone()),
            row("Location", record.location.clone()),
            row("Status", record.status.label()),
            row("Voltage Rating", record.voltage_rating.clone()),
            row("Temperature", record.temperature.to_string()),
            row("Load", record.load.to_string()),
            row("Last Test", record.last_test_date.to_string()),
        ];

        Ok(Self {
            title: REPORT_TITLE.to_string(),
            report_type: report_type.to_string(),
            generated_on,
            transformer_id: record.id.clone(),
            rows,
        })
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

/// A rendered report, ready to be handed to the user as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub format: ReportFormat,
    pub bytes: Vec<u8>,
}

pub fn artifact_file_name(transformer_id: &str, extension: &str) -> String {
    format!("{}_diagnostic_report.{}", transformer_id, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::sample_fleet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_build_report_rows() {
        let fleet = sample_fleet();
        let report = DiagnosticReport::build(&fleet[0], "Comprehensive", today()).unwrap();

        assert_eq!(report.title, "Transformer Diagnostic Report");
        assert_eq!(report.transformer_id, "T001");
        assert_eq!(report.rows.len(), 8);
        assert_eq!(report.value("Status"), Some("HEALTHY"));
        assert_eq!(report.value("Temperature"), Some("65°C"));
        assert_eq!(report.value("Load"), Some("85%"));
        assert_eq!(report.value("Last Test"), Some("2024-01-15"));
    }

    #[test]
    fn test_blank_report_type_rejected() {
        let fleet = sample_fleet();
        assert!(matches!(
            DiagnosticReport::build(&fleet[0], "   ", today()),
            Err(ReportError::MissingReportType)
        ));
    }

    #[test]
    fn test_artifact_file_name() {
        assert_eq!(artifact_file_name("T003", "csv"), "T003_diagnostic_report.csv");
    }
}
