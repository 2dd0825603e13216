use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Ms;

/// A timestamp as the backend sends it: Unix milliseconds or an ISO 8601 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTime {
    Millis(Ms),
    Text(String),
}

impl std::fmt::Display for WireTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireTime::Millis(ms) => write!(f, "{ms}"),
            WireTime::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Resolve a wire timestamp to Unix milliseconds.
///
/// Accepts RFC 3339 with any offset and bare `YYYY-MM-DD` dates (read as UTC
/// midnight). Returns `None` for anything else.
pub fn parse_ms(value: &WireTime) -> Option<Ms> {
    match value {
        WireTime::Millis(ms) => Some(*ms),
        WireTime::Text(s) => parse_text(s.trim()),
    }
}

fn parse_text(s: &str) -> Option<Ms> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Render milliseconds as `2024-01-01T10:00:00.000Z`. Falls back to the raw
/// number when the instant is outside chrono's range.
pub fn to_wire(ms: Ms) -> WireTime {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => WireTime::Text(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => WireTime::Millis(ms),
    }
}
