use calendar_lookahead::components::calendar::{
    query, CalendarSnapshot, Category, ClassifiedEvent, UpcomingEvent,
};
use calendar_lookahead::components::CalendarHandle;
use calendar_lookahead::config::Config;
use calendar_lookahead::error::other_error;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Everything the calendar says about one day
#[derive(Debug, Serialize)]
pub struct DailyDigest {
    pub date: NaiveDate,
    pub fetched_at: DateTime<Utc>,
    pub is_on_site_day: bool,
    pub is_at_home_day: bool,
    pub is_class_day: bool,
    pub birthdays_today: Vec<ClassifiedEvent>,
    pub workshops_today: Vec<ClassifiedEvent>,
    pub upcoming_birthdays: Vec<UpcomingEvent>,
    pub upcoming_workshops: Vec<UpcomingEvent>,
    pub window: Vec<ClassifiedEvent>,
}

/// Collect the digest for `date` from a single snapshot
pub fn build_digest(snapshot: &CalendarSnapshot, config: &Config, date: NaiveDate) -> DailyDigest {
    DailyDigest {
        date,
        fetched_at: snapshot.fetched_at,
        is_on_site_day: query::is_on_site_day(snapshot, date),
        is_at_home_day: query::is_at_home_day(snapshot, date),
        is_class_day: query::is_class_day(snapshot, date),
        birthdays_today: owned(query::today_for_category(snapshot, date, Category::Birthday)),
        workshops_today: owned(query::today_for_category(snapshot, date, Category::Workshop)),
        upcoming_birthdays: query::upcoming_for_category(
            snapshot,
            date,
            Category::Birthday,
            config.lookahead_days,
        ),
        upcoming_workshops: query::upcoming_for_category(
            snapshot,
            date,
            Category::Workshop,
            config.lookahead_days,
        ),
        window: owned(query::list_window(
            snapshot,
            date,
            config.list_days_range,
            config.list_days_range,
        )),
    }
}

fn owned(events: Vec<&ClassifiedEvent>) -> Vec<ClassifiedEvent> {
    events.into_iter().cloned().collect()
}

/// Refresh the feed once and print today's digest as JSON
pub async fn run(config: Config) -> miette::Result<()> {
    let calendar = CalendarHandle::from_config(&config)?;

    let snapshot = calendar.refresh().await?;

    let today = calendar.today();
    info!("Building calendar digest for {}", today);
    let digest = build_digest(&snapshot, &config, today);

    let json = serde_json::to_string_pretty(&digest)
        .map_err(calendar_lookahead::error::Error::from)?;
    println!("{}", json);

    calendar.shutdown().await?;
    Ok(())
}
