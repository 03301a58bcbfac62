//! Section update timestamps
//!
//! Stored as RFC 3339 UTC text with a fixed six-digit fraction so that
//! lexical order matches chronological order.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};

/// Timestamp for a write that follows `previous`.
///
/// The result always has microsecond precision, so it survives a round trip
/// through [`format_timestamp`] unchanged. Never returns a value at or before `previous`, so consecutive writes to
/// the same row observe strictly increasing timestamps even when the clock
/// has not advanced (or went backwards).
pub fn next_updated_at(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    let now = now.trunc_subsecs(6);
    match previous {
        Some(prev) if now <= prev => (prev + Duration::microseconds(1)).trunc_subsecs(6),
        _ => now,
    }
}

/// Canonical text form, e.g. `2025-01-31T08:15:00.000001Z`
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse any RFC 3339 timestamp (including offsets and seven-digit
/// fractions written by older builds). Returns `None` for unreadable text.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim()).ok().map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn uses_now_when_clock_advanced() {
        assert_eq!(next_updated_at(Some(at(10)), at(11)), at(11));
        assert_eq!(next_updated_at(None, at(11)), at(11));
    }

    #[test]
    fn bumps_past_previous_when_clock_stalls() {
        let prev = at(10);
        let next = next_updated_at(Some(prev), prev);
        assert!(next > prev);
        assert_eq!(next - prev, Duration::microseconds(1));

        let backwards = next_updated_at(Some(prev), at(5));
        assert!(backwards > prev);
    }

    #[test]
    fn bump_past_seven_digit_stamp_is_microsecond_precise() {
        let prev = parse_timestamp("2999-01-01T00:00:00.1234567Z").unwrap();
        let next = next_updated_at(Some(prev), at(10));

        assert!(next > prev);
        assert_eq!(format_timestamp(next), "2999-01-01T00:00:00.123457Z");
        assert_eq!(parse_timestamp(&format_timestamp(next)), Some(next));
    }

    #[test]
    fn text_form_sorts_chronologically() {
        let a = format_timestamp(at(10));
        let b = format_timestamp(at(10) + Duration::microseconds(1));
        assert_eq!(a, "1970-01-01T00:00:10.000000Z");
        assert!(a < b);
    }

    #[test]
    fn parses_legacy_round_trip_format() {
        let parsed = parse_timestamp("2024-05-01T10:00:00.1234567+08:00").unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap() + Duration::nanoseconds(123_456_700)
        );
        assert!(parse_timestamp("yesterday").is_none());
    }
}
