// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC3339 timestamp (any offset) into UTC.
pub fn parse_utc_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Display label used in workout descriptions, e.g. `April 14, 2026`.
pub fn format_display_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Current time truncated to the precision the persisted format keeps.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_date_has_no_zero_padding() {
        let date = Utc.with_ymd_and_hms(2026, 4, 4, 9, 30, 0).unwrap();
        assert_eq!(format_display_date(date), "April 4, 2026");
    }

    #[test]
    fn test_rfc3339_round_trip_keeps_millis() {
        let date = Utc.timestamp_millis_opt(1_776_000_000_123).unwrap();
        let formatted = format_utc_rfc3339(date);
        assert!(formatted.ends_with(".123Z"), "got {}", formatted);
        assert_eq!(parse_utc_rfc3339(&formatted), Some(date));
    }

    #[test]
    fn test_parse_accepts_offsets() {
        let parsed = parse_utc_rfc3339("2026-04-14T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 4, 14, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_utc_rfc3339("yesterday").is_none());
    }
}
