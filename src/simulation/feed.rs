//! Scripted live data-feed session for the data-feed view.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

pub const FEED_SCRIPT: [&str; 5] = [
    "Data feed connection established",
    "Receiving FRA data from Transformer T001",
    "Data validation completed",
    "New measurement data processed",
    "Alert: Temperature spike detected on T003",
];

/// Spacing between scripted log lines
pub const FEED_LINE_INTERVAL_SECS: i64 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeedStatus {
    #[default]
    Offline,
    Online,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedLogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct DataFeed {
    status: FeedStatus,
    log: Vec<FeedLogEntry>,
}

impl DataFeed {
    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn log(&self) -> &[FeedLogEntry] {
        &self.log
    }

    /// Bring the feed online, replacing the log with the scripted session
    /// starting at `now`.
    pub fn connect(&mut self, now: DateTime<Utc>) -> &[FeedLogEntry] {
        self.status = FeedStatus::Online;
        self.log = FEED_SCRIPT
            .iter()
            .zip(0i64..)
            .map(|(message, i)| FeedLogEntry {
                at: now + Duration::seconds(i * FEED_LINE_INTERVAL_SECS),
                message: message.to_string(),
            })
            .collect();
        &self.log
    }
}
