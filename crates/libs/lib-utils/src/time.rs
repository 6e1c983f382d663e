//! # Time Utilities
//!
//! Timestamp formatting for API responses.

use chrono::{DateTime, Utc};

/// Format a UTC timestamp as an RFC3339 string.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339()
}
