use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::types::{LoadPercent, Temperature};

/// Health classification of a transformer.
///
/// The set is closed: strings outside it fail to parse, so no record can ever
/// carry a status that the fleet statistics would not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransformerStatus {
    Healthy,
    Warning,
    Fault,
}

impl TransformerStatus {
    pub const ALL: [TransformerStatus; 3] = [Self::Healthy, Self::Warning, Self::Fault];

    /// Upper-case label used in reports and detail views.
    pub fn label(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// A monitored power transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerRecord {
    pub id: String,
    pub name: String,
    pub location: String,
    pub voltage_rating: String,
    pub status: TransformerStatus,
    pub temperature: Temperature,
    pub load: LoadPercent,
    pub last_test_date: NaiveDate,
}

impl TransformerRecord {
    /// Human-readable one-line label, e.g. `T001 - Main Power Transformer`.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            TransformerStatus::from_str("FAULT").unwrap(),
            TransformerStatus::Fault
        );
        assert_eq!(
            TransformerStatus::from_str("healthy").unwrap(),
            TransformerStatus::Healthy
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(TransformerStatus::from_str("degraded").is_err());
        assert!(serde_json::from_str::<TransformerStatus>("\"offline\"").is_err());
    }

    #[test]
    fn test_status_display_and_label() {
        assert_eq!(TransformerStatus::Warning.to_string(), "warning");
        assert_eq!(TransformerStatus::Warning.label(), "WARNING");
    }

    #[test]
    fn test_record_json_shape() {
        let record = TransformerRecord {
            id: "T001".into(),
            name: "Main Power Transformer".into(),
            location: "Substation A".into(),
            voltage_rating: "220kV".into(),
            status: TransformerStatus::Healthy,
            temperature: Temperature::celsius(65.0),
            load: LoadPercent::percent(85.0),
            last_test_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["temperature"], 65.0);
        assert_eq!(json["last_test_date"], "2024-01-15");
        assert_eq!(record.display_name(), "T001 - Main Power Transformer");
    }
}
