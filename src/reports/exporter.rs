use std::fmt::Write as _;

use super::{artifact_file_name, DiagnosticReport, ReportArtifact, ReportError, ReportFormat};

/// Renders a [`DiagnosticReport`] into a downloadable file.
///
/// Richer renderers (PDF, XLSX) plug in here; they only ever see the
/// report snapshot, never the live fleet.
pub trait ReportExporter: Send + Sync {
    fn format(&self) -> ReportFormat;

    fn extension(&self) -> &'static str;

    fn content_type(&self) -> &'static str;

    fn render(&self, report: &DiagnosticReport) -> Result<Vec<u8>, ReportError>;

    fn export(&self, report: &DiagnosticReport) -> Result<ReportArtifact, ReportError> {
        Ok(ReportArtifact {
            file_name: artifact_file_name(&report.transformer_id, self.extension()),
            content_type: self.content_type(),
            format: self.format(),
            bytes: self.render(report)?,
        })
    }
}

/// Plain-text document layout: title, metadata block, then one line per field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportExporter;

impl ReportExporter for TextReportExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Document
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn render(&self, report: &DiagnosticReport) -> Result<Vec<u8>, ReportError> {
        let mut out = String::new();
        let fmt_err = |e: std::fmt::Error| ReportError::Export(e.to_string());

        writeln!(out, "{}", report.title).map_err(fmt_err)?;
        writeln!(out).map_err(fmt_err)?;
        writeln!(out, "Report Type: {}", report.report_type).map_err(fmt_err)?;
        writeln!(out, "Generated: {}", report.generated_on).map_err(fmt_err)?;
        writeln!(out).map_err(fmt_err)?;
        for row in &report.rows {
            writeln!(out, "{}: {}", row.label, row.value).map_err(fmt_err)?;
        }
        Ok(out.into_bytes())
    }
}

/// Two-column sheet, same layout as the spreadsheet export of the dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportExporter;

impl CsvReportExporter {
    fn cell(value: &str) -> String {
        if value.contains([',', '"', '\n']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn line(cells: &[&str]) -> String {
        let cells: Vec<String> = cells.iter().map(|c| Self::cell(c)).collect();
        cells.join(",")
    }
}

impl ReportExporter for CsvReportExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Spreadsheet
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn content_type(&self) -> &'static str {
        "text/csv; charset=utf-8"
    }

    fn render(&self, report: &DiagnosticReport) -> Result<Vec<u8>, ReportError> {
        let generated = report.generated_on.to_string();
        let mut lines = vec![
            Self::line(&[&report.title]),
            String::new(),
            Self::line(&["Report Type", &report.report_type]),
            Self::line(&["Generated", &generated]),
            String::new(),
            Self::line(&["Transformer Details"]),
        ];
        lines.extend(
            report
                .rows
                .iter()
                .map(|row| Self::line(&[&row.label, &row.value])),
        );
        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out.into_bytes())
    }
}

/// Built-in exporter for `format`.
pub fn exporter_for(format: ReportFormat) -> Box<dyn ReportExporter> {
    match format {
        ReportFormat::Document => Box::new(TextReportExporter),
        ReportFormat::Spreadsheet => Box::new(CsvReportExporter),
    }
}
