use crate::error::{config_error, CalendarResult};
use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> CalendarResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| config_error(&format!("Unknown timezone: {}", name)))
}

/// Current calendar day in the given timezone
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Whole days from `reference` to `date` (negative when `date` is earlier)
pub fn days_until(date: NaiveDate, reference: NaiveDate) -> i64 {
    date.signed_duration_since(reference).num_days()
}

/// `date + days`, clamped to the last representable date
pub fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// `date - days`, clamped to the first representable date
pub fn sub_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Inclusive date range `[reference - before, reference + after]`
pub fn window_bounds(reference: NaiveDate, before: u32, after: u32) -> (NaiveDate, NaiveDate) {
    (sub_days(reference, before), add_days(reference, after))
}
