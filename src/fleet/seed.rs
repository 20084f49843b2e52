//! Built-in demo fleet and the notifications shown on first load.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{
    LoadPercent, NotificationEvent, NotificationKind, Temperature, TransformerRecord,
    TransformerStatus,
};

struct SeedRow {
    id: &'static str,
    name: &'static str,
    location: &'static str,
    voltage: &'static str,
    status: TransformerStatus,
    last_test: (i32, u32, u32),
    temperature_c: f64,
    load_percent: f64,
}

const SAMPLE_FLEET: [SeedRow; 5] = [
    SeedRow {
        id: "T001",
        name: "Main Power Transformer",
        location: "Substation A",
        voltage: "220kV",
        status: TransformerStatus::Healthy,
        last_test: (2024, 1, 15),
        temperature_c: 65.0,
        load_percent: 85.0,
    },
    SeedRow {
        id: "T002",
        name: "Distribution Transformer",
        location: "Substation B",
        voltage: "33kV",
        status: TransformerStatus::Warning,
        last_test: (2024, 1, 10),
        temperature_c: 78.0,
        load_percent: 92.0,
    },
    SeedRow {
        id: "T003",
        name: "Step-up Transformer",
        location: "Power Plant",
        voltage: "400kV",
        status: TransformerStatus::Fault,
        last_test: (2024, 1, 8),
        temperature_c: 85.0,
        load_percent: 95.0,
    },
    SeedRow {
        id: "T004",
        name: "Auxiliary Transformer",
        location: "Substation C",
        voltage: "11kV",
        status: TransformerStatus::Healthy,
        last_test: (2024, 1, 12),
        temperature_c: 62.0,
        load_percent: 70.0,
    },
    SeedRow {
        id: "T005",
        name: "Generator Transformer",
        location: "Power Plant",
        voltage: "500kV",
        status: TransformerStatus::Warning,
        last_test: (2024, 1, 9),
        temperature_c: 75.0,
        load_percent: 88.0,
    },
];

/// The five-transformer demo fleet, in display order.
pub fn sample_fleet() -> Vec<TransformerRecord> {
    SAMPLE_FLEET
        .iter()
        .filter_map(|row| {
            let (y, m, d) = row.last_test;
            Some(TransformerRecord {
                id: row.id.to_string(),
                name: row.name.to_string(),
                location: row.location.to_string(),
                voltage_rating: row.voltage.to_string(),
                status: row.status,
                temperature: Temperature::celsius(row.temperature_c),
                load: LoadPercent::percent(row.load_percent),
                last_test_date: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}

/// Initial feed contents relative to `now`, most recent first.
pub fn sample_notifications(now: DateTime<Utc>) -> Vec<NotificationEvent> {
    vec![
        NotificationEvent::at(
            NotificationKind::Error,
            "Critical Alert",
            "Transformer T003 showing severe winding deformation",
            now - Duration::minutes(30),
        ),
        NotificationEvent::at(
            NotificationKind::Warning,
            "Temperature Warning",
            "Transformer T002 temperature above normal range",
            now - Duration::minutes(60),
        ),
        NotificationEvent::at(
            NotificationKind::Info,
            "Maintenance Reminder",
            "Scheduled maintenance due for Transformer T001",
            now - Duration::minutes(120),
        ),
    ]
}
