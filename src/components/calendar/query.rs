use super::models::{CalendarSnapshot, Category, ClassifiedEvent, UpcomingEvent};
use crate::utils::time::{days_until, window_bounds};
use chrono::NaiveDate;

/// Events tagged `category` that fall on `reference`, in snapshot order
pub fn today_for_category(
    snapshot: &CalendarSnapshot,
    reference: NaiveDate,
    category: Category,
) -> Vec<&ClassifiedEvent> {
    snapshot
        .events
        .iter()
        .filter(|e| e.has(category) && e.date() == reference)
        .collect()
}

/// Events tagged `category` in `(reference, reference + days_ahead]`
///
/// Nearest first; events on the same day keep their snapshot order.
pub fn upcoming_for_category(
    snapshot: &CalendarSnapshot,
    reference: NaiveDate,
    category: Category,
    days_ahead: u32,
) -> Vec<UpcomingEvent> {
    let horizon = i64::from(days_ahead);

    let mut upcoming: Vec<UpcomingEvent> = snapshot
        .events
        .iter()
        .filter(|e| e.has(category))
        .filter_map(|e| {
            let days = days_until(e.date(), reference);
            (1..=horizon).contains(&days).then(|| UpcomingEvent {
                event: e.clone(),
                days_until: days,
            })
        })
        .collect();

    // sort_by_key is stable
    upcoming.sort_by_key(|u| u.days_until);
    upcoming
}

/// Every event in `[reference - days_before, reference + days_after]`, by date
pub fn list_window(
    snapshot: &CalendarSnapshot,
    reference: NaiveDate,
    days_before: u32,
    days_after: u32,
) -> Vec<&ClassifiedEvent> {
    let (start, end) = window_bounds(reference, days_before, days_after);

    let mut events: Vec<&ClassifiedEvent> = snapshot
        .events
        .iter()
        .filter(|e| (start..=end).contains(&e.date()))
        .collect();

    events.sort_by_key(|e| e.date());
    events
}

pub fn is_on_site_day(snapshot: &CalendarSnapshot, reference: NaiveDate) -> bool {
    has_category_on(snapshot, reference, Category::OnSite)
}

pub fn is_at_home_day(snapshot: &CalendarSnapshot, reference: NaiveDate) -> bool {
    has_category_on(snapshot, reference, Category::AtHome)
}

/// A class day is any day with an on-site or at-home event
pub fn is_class_day(snapshot: &CalendarSnapshot, reference: NaiveDate) -> bool {
    is_on_site_day(snapshot, reference) || is_at_home_day(snapshot, reference)
}

fn has_category_on(snapshot: &CalendarSnapshot, reference: NaiveDate, category: Category) -> bool {
    !today_for_category(snapshot, reference, category).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::calendar::models::NormalizedEvent;
    use chrono::{Days, Utc};

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn event(summary: &str, description: &str, offset: i64) -> ClassifiedEvent {
        let date = if offset >= 0 {
            reference() + Days::new(offset as u64)
        } else {
            reference() - Days::new(offset.unsigned_abs())
        };
        ClassifiedEvent::new(NormalizedEvent {
            uid: None,
            summary: summary.to_string(),
            description: description.to_string(),
            date,
            time: None,
        })
    }

    fn snapshot(events: Vec<ClassifiedEvent>) -> CalendarSnapshot {
        CalendarSnapshot {
            events,
            fetched_at: Utc::now(),
        }
    }

    fn summaries(events: &[&ClassifiedEvent]) -> Vec<String> {
        events.iter().map(|e| e.event.summary.clone()).collect()
    }

    #[test]
    fn test_today_only_matches_reference_date() {
        let snap = snapshot(vec![
            event("John's Birthday", "", 0),
            event("Anna's Birthday", "", 1),
            event("Lunch", "", 0),
            event("Mia bday", "", 0),
            event("Old Birthday", "", -1),
        ]);

        let today = today_for_category(&snap, reference(), Category::Birthday);
        assert_eq!(summaries(&today), vec!["John's Birthday", "Mia bday"]);
        assert!(today.iter().all(|e| e.date() == reference()));
    }

    #[test]
    fn test_upcoming_sorted_and_bounded() {
        let snap = snapshot(vec![
            event("Far workshop", "", 7),
            event("Too far workshop", "", 8),
            event("Today workshop", "", 0),
            event("Past workshop", "", -2),
            event("Near workshop", "", 2),
            event("Second near training", "", 2),
            event("Tomorrow atelier", "", 1),
        ]);

        let upcoming = upcoming_for_category(&snap, reference(), Category::Workshop, 7);
        let names: Vec<&str> = upcoming.iter().map(|u| u.event.event.summary.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Tomorrow atelier",
                "Near workshop",
                "Second near training",
                "Far workshop"
            ]
        );

        let days: Vec<i64> = upcoming.iter().map(|u| u.days_until).collect();
        assert_eq!(days, vec![1, 2, 2, 7]);
        assert!(days.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_upcoming_zero_days_is_empty() {
        let snap = snapshot(vec![event("Workshop", "", 0), event("Workshop", "", 1)]);
        assert!(upcoming_for_category(&snap, reference(), Category::Workshop, 0).is_empty());
    }

    #[test]
    fn test_upcoming_boundary() {
        let snap = snapshot(vec![
            event("Edge bday", "", 3),
            event("Beyond bday", "", 4),
        ]);
        let upcoming = upcoming_for_category(&snap, reference(), Category::Birthday, 3);

        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].event.event.summary, "Edge bday");
        assert_eq!(upcoming[0].days_until, 3);
    }

    #[test]
    fn test_list_window_sorted_by_date() {
        let snap = snapshot(vec![
            event("C", "", 5),
            event("A", "", -3),
            event("Outside before", "", -4),
            event("B1", "", 0),
            event("B2", "on site", 0),
            event("Outside after", "", 6),
        ]);

        let listed = list_window(&snap, reference(), 3, 5);
        assert_eq!(summaries(&listed), vec!["A", "B1", "B2", "C"]);
        assert!(listed[2].has(Category::OnSite));
        assert!(listed[1].categories.is_empty());
    }

    #[test]
    fn test_day_flags() {
        let snap = snapshot(vec![
            event("Onsite day", "", 0),
            event("Working from home", "", 1),
        ]);

        assert!(is_on_site_day(&snap, reference()));
        assert!(!is_at_home_day(&snap, reference()));
        assert!(is_class_day(&snap, reference()));

        let tomorrow = reference() + Days::new(1);
        assert!(!is_on_site_day(&snap, tomorrow));
        assert!(is_at_home_day(&snap, tomorrow));
        assert!(is_class_day(&snap, tomorrow));

        let later = reference() + Days::new(2);
        assert!(!is_class_day(&snap, later));
    }
}
