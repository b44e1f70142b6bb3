//! Time utilities for rendering wire timestamps

use chrono::{TimeZone, Utc};

/// Convert Unix seconds to an RFC 3339 UTC string
///
/// Out-of-range values (which a malformed message can carry) are shown as the
/// raw number instead.
///
/// # Examples
/// ```
/// use dash_wire::utils::time::format_unix_time;
/// assert_eq!(format_unix_time(0), "1970-01-01T00:00:00Z");
/// assert_eq!(format_unix_time(1704067200), "2024-01-01T00:00:00Z");
/// ```
pub fn format_unix_time(timestamp: i64) -> String {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| format!("{} (out of range)", timestamp))
}
