//! Lead Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column order of an appended lead row
pub const LEAD_COLUMNS: [&str; 6] = ["timestamp", "name", "phone", "date", "time", "party_size"];

/// Booking submission payload
///
/// `date` and `time` are free-form ("tonight", "7pm"); only name, phone and
/// party size are checked before the lead is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Signed so that negative input reaches validation instead of failing decode
    pub party_size: i64,
}

/// Captured reservation request, as appended to the lead store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// ISO-8601, second precision, no offset (e.g. `2026-06-11T19:00:05`)
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub party_size: u32,
}

impl Lead {
    /// Build a lead from an already validated request
    pub fn new(request: BookingRequest, party_size: u32, at: NaiveDateTime) -> Self {
        Self {
            timestamp: format_timestamp(at),
            name: request.name,
            phone: request.phone,
            date: request.date,
            time: request.time,
            party_size,
        }
    }

    /// Row cells in [`LEAD_COLUMNS`] order
    pub fn row(&self) -> Vec<serde_json::Value> {
        vec![
            self.timestamp.clone().into(),
            self.name.clone().into(),
            self.phone.clone().into(),
            self.date.clone().into(),
            self.time.clone().into(),
            self.party_size.into(),
        ]
    }
}

/// Second-precision ISO-8601 without offset
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}
