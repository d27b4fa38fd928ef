// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, ParseError, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC3339 timestamp with any offset into UTC.
pub fn parse_utc_rfc3339(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_normalize_to_utc() {
        let date = parse_utc_rfc3339("2024-10-19T00:05:00-07:00").unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-10-19T07:05:00Z");
    }

    #[test]
    fn test_fractional_seconds_dropped_on_format() {
        let date = parse_utc_rfc3339("2024-10-19T07:05:00.750Z").unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-10-19T07:05:00Z");
    }

    #[test]
    fn test_rejects_non_rfc3339() {
        assert!(parse_utc_rfc3339("19 Oct 2024").is_err());
    }
}
