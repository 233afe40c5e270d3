//! Shared utility functions for inclinometer crates.

/// Timestamp utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    /// Layouts accepted for campaign keys, tried in order after RFC 3339.
    const TIMESTAMP_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    /// Format a campaign timestamp as "YYYY-MM-DD HH:MM" for report headers
    pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
        timestamp.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Parse an ISO-8601 campaign timestamp.
    ///
    /// An explicit UTC offset is dropped and the wall-clock time kept.
    /// A bare date is taken at midnight.
    pub fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.naive_local());
        }
        for format in TIMESTAMP_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(dt);
            }
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("invalid timestamp {s:?}: {e}"))?;
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid timestamp {s:?}"))
    }

}

/// Number formatting for report cells
pub mod numbers {
    /// Format with a fixed number of decimals, mapping negative zero to zero.
    pub fn format_fixed(value: f64, decimals: usize) -> String {
        let formatted = format!("{value:.decimals$}");
        if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
            formatted[1..].to_string()
        } else {
            formatted
        }
    }

    /// Tolerance for comparing computed series values.
    pub const EPSILON: f64 = 1e-9;

    /// Absolute-tolerance float comparison.
    pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

}
