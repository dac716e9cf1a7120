use super::models::{EventStart, NormalizedEvent, RawEvent};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

const DATE_FORMATS: [&str; 2] = ["%Y%m%d", "%Y-%m-%d"];

const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y%m%dT%H%M%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Classify a raw start value into a date, a date with time, or nothing usable
///
/// Date-times keep the wall-clock values written in the feed; a trailing `Z`
/// or numeric offset is accepted but not converted.
pub fn resolve_start(raw: Option<&str>) -> EventStart {
    let value = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return EventStart::Unresolvable,
    };

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return EventStart::DateOnly(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        let local = dt.naive_local();
        return EventStart::DateTime(local.date(), local.time());
    }

    let floating = value.strip_suffix('Z').unwrap_or(value);
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(floating, format) {
            return EventStart::DateTime(dt.date(), dt.time());
        }
    }

    EventStart::Unresolvable
}

/// Turn a raw feed event into a normalized one, or drop it
pub fn normalize(raw: &RawEvent) -> Option<NormalizedEvent> {
    let (date, time) = match resolve_start(raw.start.as_deref()) {
        EventStart::DateOnly(date) => (date, None),
        EventStart::DateTime(date, time) => (date, Some(time)),
        EventStart::Unresolvable => {
            debug!(
                uid = raw.uid.as_deref().unwrap_or(""),
                summary = raw.summary.as_deref().unwrap_or(""),
                start = raw.start.as_deref().unwrap_or(""),
                "Skipping event with unresolved start date"
            );
            return None;
        }
    };

    Some(NormalizedEvent {
        uid: raw.uid.clone(),
        summary: raw.summary.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        date,
        time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_resolve_date_only() {
        assert_eq!(
            resolve_start(Some("20240115")),
            EventStart::DateOnly(date(2024, 1, 15))
        );
        assert_eq!(
            resolve_start(Some(" 2024-01-15 ")),
            EventStart::DateOnly(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_resolve_date_time() {
        assert_eq!(
            resolve_start(Some("20240115T093000")),
            EventStart::DateTime(date(2024, 1, 15), time(9, 30))
        );
        assert_eq!(
            resolve_start(Some("20240115T233000Z")),
            EventStart::DateTime(date(2024, 1, 15), time(23, 30))
        );
        // Offset is kept as written, not converted to UTC
        assert_eq!(
            resolve_start(Some("2024-01-15T00:30:00+02:00")),
            EventStart::DateTime(date(2024, 1, 15), time(0, 30))
        );
        assert_eq!(
            resolve_start(Some("2024-01-15 18:05")),
            EventStart::DateTime(date(2024, 1, 15), time(18, 5))
        );
    }

    #[test]
    fn test_resolve_unresolvable() {
        assert_eq!(resolve_start(None), EventStart::Unresolvable);
        assert_eq!(resolve_start(Some("")), EventStart::Unresolvable);
        assert_eq!(resolve_start(Some("tomorrow")), EventStart::Unresolvable);
        assert_eq!(resolve_start(Some("2024-02-30")), EventStart::Unresolvable);
        assert_eq!(resolve_start(Some("20241301T100000")), EventStart::Unresolvable);
    }

    #[test]
    fn test_normalize_defaults_missing_text() {
        let raw = RawEvent {
            start: Some("20240115".to_string()),
            ..Default::default()
        };
        let event = normalize(&raw).unwrap();

        assert_eq!(event.summary, "");
        assert_eq!(event.description, "");
        assert_eq!(event.date, date(2024, 1, 15));
        assert_eq!(event.time, None);
    }

    #[test]
    fn test_normalize_drops_unresolved() {
        let raw = RawEvent {
            summary: Some("Birthday".to_string()),
            start: Some("soon".to_string()),
            ..Default::default()
        };
        assert!(normalize(&raw).is_none());
    }
}
