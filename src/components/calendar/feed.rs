use super::models::RawEvent;
use crate::error::{fetch_error, parse_error, CalendarResult};
use async_trait::async_trait;
use icalendar::parser::unfold;
use icalendar::{Calendar, CalendarComponent, Component};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Source of raw calendar events
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Retrieve and parse the whole feed
    async fn fetch(&self) -> CalendarResult<Vec<RawEvent>>;
}

/// Fetches a public iCal (`.ics`) feed over HTTP
#[derive(Debug, Clone)]
pub struct IcalFeedFetcher {
    url: Url,
    client: Client,
}

impl IcalFeedFetcher {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl FeedFetcher for IcalFeedFetcher {
    async fn fetch(&self) -> CalendarResult<Vec<RawEvent>> {
        info!("Fetching calendar feed from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(&format!("Failed to fetch feed: {}", e)))?;

        if !response.status().is_success() {
            return Err(fetch_error(&format!(
                "Failed to fetch feed: HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(&format!("Failed to read feed body: {}", e)))?;

        let events = parse_ical(&body)?;
        debug!("Feed contained {} event(s)", events.len());
        Ok(events)
    }
}

/// Parse iCalendar text into raw events, one per VEVENT
///
/// The body must be a complete `VCALENDAR` object; anything else (an HTML
/// login page, an empty or truncated download) is a parse error.
pub fn parse_ical(body: &str) -> CalendarResult<Vec<RawEvent>> {
    let unfolded = unfold(body);
    check_envelope(&unfolded)?;

    let calendar = unfolded
        .parse::<Calendar>()
        .map_err(|e| parse_error(&format!("Invalid iCalendar data: {}", e)))?;

    let events = calendar
        .components
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(RawEvent {
                uid: event.get_uid().map(str::to_string),
                summary: event.get_summary().map(str::to_string),
                description: event.get_description().map(str::to_string),
                start: event.property_value("DTSTART").map(str::to_string),
            }),
            _ => None,
        })
        .collect();

    Ok(events)
}

/// First and last content lines must open and close a VCALENDAR
fn check_envelope(unfolded: &str) -> CalendarResult<()> {
    let mut lines = unfolded.lines().map(str::trim).filter(|l| !l.is_empty());

    match lines.next() {
        Some(first) if first.eq_ignore_ascii_case("BEGIN:VCALENDAR") => {}
        _ => return Err(parse_error("Feed does not start with BEGIN:VCALENDAR")),
    }
    match lines.last() {
        Some(last) if last.eq_ignore_ascii_case("END:VCALENDAR") => Ok(()),
        _ => Err(parse_error("Feed is missing END:VCALENDAR")),
    }
}
