use super::actor::{CalendarActorHandle, CalendarCacheActor};
use super::feed::{FeedFetcher, IcalFeedFetcher};
use super::models::{CalendarSnapshot, Category, ClassifiedEvent, UpcomingEvent};
use super::query;
use crate::config::Config;
use crate::error::CalendarResult;
use crate::utils::time::today_in;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle for interacting with the calendar cache
///
/// Clones share the same cache. Queries take an explicit reference date;
/// [`CalendarHandle::today`] gives the current day in the configured timezone.
#[derive(Clone)]
pub struct CalendarHandle {
    actor_handle: CalendarActorHandle,
    timezone: Tz,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CalendarHandle {
    /// Create a new CalendarHandle and spawn the cache actor
    pub fn new(fetcher: Arc<dyn FeedFetcher>, timezone: Tz) -> Self {
        let (mut actor, handle) = CalendarCacheActor::new(fetcher);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            timezone,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Create a cache backed by the configured iCal feed
    pub fn from_config(config: &Config) -> CalendarResult<Self> {
        let fetcher = IcalFeedFetcher::new(config.feed_url()?);
        Ok(Self::new(Arc::new(fetcher), config.tz()?))
    }

    /// Current day in the configured timezone
    pub fn today(&self) -> NaiveDate {
        today_in(self.timezone)
    }

    /// Fetch the feed and swap in a new snapshot
    pub async fn refresh(&self) -> CalendarResult<Arc<CalendarSnapshot>> {
        self.actor_handle.refresh().await
    }

    /// Current snapshot, fetched on first use
    pub async fn snapshot(&self) -> CalendarResult<Arc<CalendarSnapshot>> {
        self.actor_handle.snapshot().await
    }

    /// When the current snapshot was fetched
    pub async fn last_refresh(&self) -> CalendarResult<Option<DateTime<Utc>>> {
        self.actor_handle.last_refresh().await
    }

    pub async fn today_for(
        &self,
        category: Category,
        reference: NaiveDate,
    ) -> CalendarResult<Vec<ClassifiedEvent>> {
        let snapshot = self.snapshot().await?;
        let events: Vec<ClassifiedEvent> = query::today_for_category(&snapshot, reference, category)
            .into_iter()
            .cloned()
            .collect();
        debug!("{} {} event(s) on {}", events.len(), category, reference);
        Ok(events)
    }

    pub async fn upcoming_for(
        &self,
        category: Category,
        reference: NaiveDate,
        days_ahead: u32,
    ) -> CalendarResult<Vec<UpcomingEvent>> {
        let snapshot = self.snapshot().await?;
        let events = query::upcoming_for_category(&snapshot, reference, category, days_ahead);
        debug!(
            "{} {} event(s) within {} day(s) of {}",
            events.len(),
            category,
            days_ahead,
            reference
        );
        Ok(events)
    }

    pub async fn list_window(
        &self,
        reference: NaiveDate,
        days_before: u32,
        days_after: u32,
    ) -> CalendarResult<Vec<ClassifiedEvent>> {
        let snapshot = self.snapshot().await?;
        Ok(query::list_window(&snapshot, reference, days_before, days_after)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn is_on_site_day(&self, reference: NaiveDate) -> CalendarResult<bool> {
        let snapshot = self.snapshot().await?;
        Ok(query::is_on_site_day(&snapshot, reference))
    }

    pub async fn is_at_home_day(&self, reference: NaiveDate) -> CalendarResult<bool> {
        let snapshot = self.snapshot().await?;
        Ok(query::is_at_home_day(&snapshot, reference))
    }

    pub async fn is_class_day(&self, reference: NaiveDate) -> CalendarResult<bool> {
        let snapshot = self.snapshot().await?;
        Ok(query::is_class_day(&snapshot, reference))
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CalendarResult<()> {
        self.actor_handle.shutdown().await
    }
}
