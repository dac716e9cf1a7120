mod actor;
pub mod classify;
pub mod feed;
mod handle;
pub mod models;
pub mod normalize;
pub mod query;

pub use feed::{FeedFetcher, IcalFeedFetcher};
pub use handle::CalendarHandle;
pub use models::{
    CalendarSnapshot, Category, ClassifiedEvent, EventStart, NormalizedEvent, RawEvent,
    UpcomingEvent,
};
