use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Date-time layouts carrying an explicit UTC offset. A trailing `Z` is
/// rewritten to `+00:00` before these are tried.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

/// Date-time layouts without an offset, read in the configured zone.
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts read as local midnight in the configured zone.
const LOCAL_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y"];

/// Parse a date/time string into milliseconds since the Unix epoch.
///
/// Explicit offsets are honored. ISO `YYYY-MM-DD`, `YYYY-MM` and `YYYY`
/// dates are UTC midnight of their first day. Everything else is wall-clock
/// time in `tz`; nonexistent local times are invalid and ambiguous ones
/// resolve to the earlier instant. Invalid input yields `f64::NAN`.
pub fn parse_timestamp_ms(s: &str, tz: Tz) -> f64 {
    parse_timestamp(s, tz)
        .map(|millis| millis as f64)
        .unwrap_or(f64::NAN)
}

fn parse_timestamp(s: &str, tz: Tz) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    let with_offset = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
            return Some(dt.timestamp_millis());
        }
    }

    for fmt in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(&naive, tz);
        }
    }

    if let Some(date) = parse_iso_date(s) {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc().timestamp_millis());
    }

    for fmt in LOCAL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return localize(&date.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, missing parts defaulting to the first.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    match bytes.len() {
        10 => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
        7 if digits(0..4) && bytes[4] == b'-' && digits(5..7) => {
            NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
        }
        4 if digits(0..4) => {
            NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

fn localize(naive: &NaiveDateTime, tz: Tz) -> Option<i64> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    const JAN_2_0400_UTC: f64 = 1_704_168_000_000.0;

    #[test]
    fn space_separated_utc() {
        assert_eq!(
            parse_timestamp_ms("2024-01-02 04:00:00", Tz::UTC),
            JAN_2_0400_UTC
        );
    }

    #[test]
    fn space_separated_in_zone() {
        // EST is UTC-5 in January
        assert_eq!(
            parse_timestamp_ms("2024-01-02 04:00:00", New_York),
            JAN_2_0400_UTC + 5.0 * 3_600_000.0
        );
    }

    #[test]
    fn iso_t_separator_and_fraction() {
        assert_eq!(
            parse_timestamp_ms("2024-01-02T04:00:00.250", Tz::UTC),
            JAN_2_0400_UTC + 250.0
        );
    }

    #[test]
    fn minutes_only() {
        assert_eq!(parse_timestamp_ms("2024-01-02 04:00", Tz::UTC), JAN_2_0400_UTC);
    }

    #[test]
    fn explicit_offset_ignores_zone() {
        assert_eq!(
            parse_timestamp_ms("2024-01-02T04:00:00Z", New_York),
            JAN_2_0400_UTC
        );
        assert_eq!(
            parse_timestamp_ms("2024-01-01T23:00:00-05:00", New_York),
            JAN_2_0400_UTC
        );
        assert_eq!(
            parse_timestamp_ms("2024-01-02 06:00:00+02:00", Tz::UTC),
            JAN_2_0400_UTC
        );
    }

    #[test]
    fn offset_without_seconds() {
        assert_eq!(parse_timestamp_ms("2024-01-02T04:00Z", New_York), JAN_2_0400_UTC);
        assert_eq!(
            parse_timestamp_ms("2024-01-02T06:00+02:00", Tz::UTC),
            JAN_2_0400_UTC
        );
        assert_eq!(
            parse_timestamp_ms("2024-01-01 23:00-0500", Tz::UTC),
            JAN_2_0400_UTC
        );
    }

    #[test]
    fn zulu_suffix_with_space_separator() {
        assert_eq!(
            parse_timestamp_ms("2024-01-02 04:00:00Z", New_York),
            JAN_2_0400_UTC
        );
    }

    #[test]
    fn year_month_and_year_are_utc() {
        let jan_1_2024 = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis() as f64;
        assert_eq!(parse_timestamp_ms("2024-01", New_York), jan_1_2024);
        assert_eq!(parse_timestamp_ms("2024", New_York), jan_1_2024);
        assert!(parse_timestamp_ms("2024-13", Tz::UTC).is_nan());
    }

    #[test]
    fn iso_date_only_is_utc_midnight() {
        assert_eq!(
            parse_timestamp_ms("2024-01-02", New_York),
            JAN_2_0400_UTC - 4.0 * 3_600_000.0
        );
    }

    #[test]
    fn slash_dates_are_local() {
        let utc_midnight = JAN_2_0400_UTC - 4.0 * 3_600_000.0;
        assert_eq!(parse_timestamp_ms("2024/01/02", Tz::UTC), utc_midnight);
        assert_eq!(parse_timestamp_ms("01/02/2024", Tz::UTC), utc_midnight);
        assert_eq!(
            parse_timestamp_ms("01/02/2024 04:00:00", Tz::UTC),
            JAN_2_0400_UTC
        );
        assert_eq!(
            parse_timestamp_ms("2024/01/02", New_York),
            utc_midnight + 5.0 * 3_600_000.0
        );
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        assert_eq!(
            parse_timestamp_ms("  2024-01-02 04:00:00 ", Tz::UTC),
            JAN_2_0400_UTC
        );
    }

    #[test]
    fn dst_gap_is_invalid() {
        // 2025-03-09 02:30 does not exist in New York
        assert!(parse_timestamp_ms("2025-03-09 02:30:00", New_York).is_nan());
    }

    #[test]
    fn dst_fold_picks_earlier_instant() {
        // 2025-11-02 01:30 happens twice; EDT (UTC-4) comes first
        let expected = NaiveDate::from_ymd_opt(2025, 11, 2)
            .unwrap()
            .and_hms_opt(5, 30, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis() as f64;
        assert_eq!(
            parse_timestamp_ms("2025-11-02 01:30:00", New_York),
            expected
        );
    }

    #[test]
    fn garbage_is_nan() {
        for input in ["", "   ", "not a date", "2024-13-01", "2024-02-30 00:00:00", "1704168000"] {
            assert!(
                parse_timestamp_ms(input, Tz::UTC).is_nan(),
                "expected NaN for {input:?}"
            );
        }
    }
}
