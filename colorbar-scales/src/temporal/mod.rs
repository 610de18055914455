pub mod timestamp;

use chrono::{DateTime, NaiveDateTime};

/// Milliseconds since the unix epoch, the numeric space timestamps are interpolated in
pub fn to_millis(date: &NaiveDateTime) -> f64 {
    date.and_utc().timestamp_millis() as f64
}

pub fn from_millis(ms: f64) -> Option<NaiveDateTime> {
    if !ms.is_finite() {
        return None;
    }
    Some(DateTime::from_timestamp_millis(ms.round() as i64)?.naive_utc())
}
