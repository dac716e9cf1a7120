use super::feed::FeedFetcher;
use super::models::CalendarSnapshot;
use crate::error::{component_error, CalendarResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The calendar cache actor, sole owner of the current snapshot
pub struct CalendarCacheActor {
    fetcher: Arc<dyn FeedFetcher>,
    snapshot: Option<Arc<CalendarSnapshot>>,
    command_rx: mpsc::Receiver<CalendarCommand>,
}

/// Commands that can be sent to the calendar cache actor
pub enum CalendarCommand {
    Refresh(mpsc::Sender<CalendarResult<Arc<CalendarSnapshot>>>),
    Snapshot(mpsc::Sender<CalendarResult<Arc<CalendarSnapshot>>>),
    LastRefresh(mpsc::Sender<Option<DateTime<Utc>>>),
    Shutdown,
}

/// Handle for communicating with the calendar cache actor
#[derive(Clone)]
pub struct CalendarActorHandle {
    command_tx: mpsc::Sender<CalendarCommand>,
}

impl CalendarActorHandle {
    /// Fetch the feed and replace the snapshot
    pub async fn refresh(&self) -> CalendarResult<Arc<CalendarSnapshot>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(CalendarCommand::Refresh(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// Current snapshot, fetching first if the cache is empty
    pub async fn snapshot(&self) -> CalendarResult<Arc<CalendarSnapshot>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(CalendarCommand::Snapshot(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// Fetch time of the current snapshot, `None` while empty
    pub async fn last_refresh(&self) -> CalendarResult<Option<DateTime<Utc>>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(CalendarCommand::LastRefresh(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CalendarResult<()> {
        let _ = self.command_tx.send(CalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl CalendarCacheActor {
    /// Create a new actor and return its handle
    pub fn new(fetcher: Arc<dyn FeedFetcher>) -> (Self, CalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            fetcher,
            snapshot: None,
            command_rx,
        };

        let handle = CalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Calendar cache actor started");

        // Commands are handled one at a time, so refreshes never interleave
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                CalendarCommand::Refresh(response_tx) => {
                    let result = self.refresh().await;
                    let _ = response_tx.send(result).await;
                }
                CalendarCommand::Snapshot(response_tx) => {
                    let result = match &self.snapshot {
                        Some(snapshot) => Ok(Arc::clone(snapshot)),
                        None => {
                            info!("Calendar cache is empty, refreshing before answering");
                            self.refresh().await
                        }
                    };
                    let _ = response_tx.send(result).await;
                }
                CalendarCommand::LastRefresh(response_tx) => {
                    let fetched_at = self.snapshot.as_ref().map(|s| s.fetched_at);
                    let _ = response_tx.send(fetched_at).await;
                }
                CalendarCommand::Shutdown => {
                    info!("Calendar cache actor shutting down");
                    break;
                }
            }
        }

        info!("Calendar cache actor shut down");
    }

    /// Build a new snapshot from the feed; the old one survives any failure
    async fn refresh(&mut self) -> CalendarResult<Arc<CalendarSnapshot>> {
        let raw_events = match self.fetcher.fetch().await {
            Ok(events) => events,
            Err(e) => {
                error!("Calendar refresh failed, keeping previous snapshot: {}", e);
                return Err(e);
            }
        };

        let snapshot = Arc::new(CalendarSnapshot::build(&raw_events, Utc::now()));
        info!(
            "Calendar refreshed at {}: {} of {} event(s) kept",
            snapshot.fetched_at,
            snapshot.len(),
            raw_events.len()
        );

        self.snapshot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}
