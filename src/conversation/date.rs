use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

pub const UNKNOWN_DATE: &str = "Unknown date";

// Timestamps without an offset are read as local wall-clock time.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Format a backend timestamp as `Mon DD YYYY, h:mm AM` in local time.
/// Absent or unparseable input yields "Unknown date".
pub fn format_date(value: Option<&str>) -> String {
    match value.and_then(parse_timestamp) {
        Some(dt) => format_timestamp(&dt),
        None => UNKNOWN_DATE.to_string(),
    }
}

pub fn format_timestamp<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format("%b %d %Y, %-I:%M %p").to_string()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    // Date-only strings are midnight UTC.
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_afternoon() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 15, 7, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "Jan 05 2024, 3:07 PM");
    }

    #[test]
    fn test_format_midnight_and_noon() {
        let midnight = Utc.with_ymd_and_hms(2024, 7, 14, 0, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 7, 14, 12, 30, 0).unwrap();
        assert_eq!(format_timestamp(&midnight), "Jul 14 2024, 12:00 AM");
        assert_eq!(format_timestamp(&noon), "Jul 14 2024, 12:30 PM");
    }

    #[test]
    fn test_format_keeps_offset() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let dt = tz.with_ymd_and_hms(2024, 11, 2, 9, 41, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "Nov 02 2024, 9:41 AM");
    }

    #[test]
    fn test_naive_timestamp_is_local() {
        assert_eq!(
            format_date(Some("2024-03-09T08:05:00")),
            "Mar 09 2024, 8:05 AM"
        );
        assert_eq!(
            format_date(Some("2024-03-09 20:05:00.123456")),
            "Mar 09 2024, 8:05 PM"
        );
    }

    #[test]
    fn test_rfc3339_parses() {
        assert_ne!(format_date(Some("2024-03-09T08:05:00Z")), UNKNOWN_DATE);
        assert_ne!(format_date(Some("2024-03-09T08:05:00+02:00")), UNKNOWN_DATE);
    }

    #[test]
    fn test_unknown_date() {
        assert_eq!(format_date(None), UNKNOWN_DATE);
        assert_eq!(format_date(Some("")), UNKNOWN_DATE);
        assert_eq!(format_date(Some("not a date")), UNKNOWN_DATE);
        assert_eq!(format_date(Some("2024-13-40")), UNKNOWN_DATE);
    }
}
