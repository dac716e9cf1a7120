use super::classify::classify;
use super::normalize::normalize;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Calendar event as handed over by a feed fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Start value exactly as the feed carried it
    pub start: Option<String>,
}

/// Shape of an event start, resolved once by the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStart {
    DateOnly(NaiveDate),
    DateTime(NaiveDate, NaiveTime),
    Unresolvable,
}

/// Event with a resolved day and optional wall-clock start time
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub uid: Option<String>,
    pub summary: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

/// Semantic tag attached to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Birthday,
    Workshop,
    OnSite,
    AtHome,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Birthday => "birthday",
            Category::Workshop => "workshop",
            Category::OnSite => "on_site",
            Category::AtHome => "at_home",
        };
        f.write_str(name)
    }
}

/// Normalized event together with every category it matched
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClassifiedEvent {
    #[serde(flatten)]
    pub event: NormalizedEvent,
    pub categories: BTreeSet<Category>,
}

impl ClassifiedEvent {
    pub fn new(event: NormalizedEvent) -> Self {
        let categories = classify(&event.summary, &event.description);
        Self { event, categories }
    }

    pub fn has(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn date(&self) -> NaiveDate {
        self.event.date
    }
}

/// Event inside a lookahead window
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpcomingEvent {
    #[serde(flatten)]
    pub event: ClassifiedEvent,
    /// Days from the reference date, 1 means tomorrow
    pub days_until: i64,
}

/// Immutable set of classified events from one refresh
#[derive(Debug, Clone)]
pub struct CalendarSnapshot {
    pub events: Vec<ClassifiedEvent>,
    pub fetched_at: DateTime<Utc>,
}

impl CalendarSnapshot {
    /// Normalize and classify a feed, dropping events without a usable start
    pub fn build(raw_events: &[RawEvent], fetched_at: DateTime<Utc>) -> Self {
        let events: Vec<ClassifiedEvent> = raw_events
            .iter()
            .filter_map(normalize)
            .map(ClassifiedEvent::new)
            .collect();

        let dropped = raw_events.len() - events.len();
        if dropped > 0 {
            debug!("Dropped {} event(s) with unresolved start dates", dropped);
        }

        Self { events, fetched_at }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// `(date, categories)` pairs in snapshot order, independent of fetch time
    pub fn classification(&self) -> Vec<(NaiveDate, BTreeSet<Category>)> {
        self.events
            .iter()
            .map(|e| (e.date(), e.categories.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(summary: &str, start: Option<&str>) -> RawEvent {
        RawEvent {
            summary: Some(summary.to_string()),
            start: start.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_drops_unresolved_and_keeps_order() {
        let raw_events = vec![
            raw("Team bday", Some("20240312")),
            raw("Broken", Some("next tuesday")),
            raw("Missing start", None),
            raw("Remote day", Some("2024-03-11T09:00:00")),
        ];
        let snapshot = CalendarSnapshot::build(&raw_events, Utc::now());

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.events[0].event.summary, "Team bday");
        assert!(snapshot.events[0].has(Category::Birthday));
        assert_eq!(snapshot.events[1].event.summary, "Remote day");
        assert!(snapshot.events[1].has(Category::AtHome));
        assert!(snapshot.events[1].event.time.is_some());
    }

    #[test]
    fn test_serialized_event_is_flat() {
        let event = ClassifiedEvent::new(NormalizedEvent {
            uid: None,
            summary: "Workshop".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
            time: None,
        });
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["summary"], "Workshop");
        assert_eq!(json["date"], "2024-03-12");
        assert_eq!(json["categories"], serde_json::json!(["Workshop"]));
    }
}
