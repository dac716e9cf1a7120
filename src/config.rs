use crate::error::{config_error, env_error, CalendarResult};
use crate::utils::time::parse_timezone;
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use url::Url;

/// Default optional overrides file
pub const CONFIG_FILE: &str = "config/calendar.toml";

/// Default number of days the upcoming queries look ahead
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 7;

/// Default number of days before and after today for the list window
pub const DEFAULT_LIST_DAYS_RANGE: u32 = 30;

/// Main configuration structure for the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the iCal feed
    pub ical_url: String,
    /// Timezone used to decide what "today" is
    pub timezone: String,
    /// Default lookahead for upcoming queries
    pub lookahead_days: u32,
    /// Default days before/after today for the list window
    pub list_days_range: u32,
}

/// Values that `config/calendar.toml` may override
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    timezone: Option<String>,
    lookahead_days: Option<u32>,
    list_days_range: Option<u32>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> CalendarResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let ical_url = env::var("ICAL_URL").map_err(|_| env_error("ICAL_URL"))?;
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));
        let lookahead_days = parse_days_var("LOOKAHEAD_DAYS", DEFAULT_LOOKAHEAD_DAYS)?;
        let list_days_range = parse_days_var("LIST_DAYS_RANGE", DEFAULT_LIST_DAYS_RANGE)?;

        let mut config = Config {
            ical_url,
            timezone,
            lookahead_days,
            list_days_range,
        };

        if let Some(overrides) = read_overrides(Path::new(CONFIG_FILE))? {
            config.apply(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parsed feed URL
    pub fn feed_url(&self) -> CalendarResult<Url> {
        Url::parse(&self.ical_url)
            .map_err(|e| config_error(&format!("Invalid ICAL_URL '{}': {}", self.ical_url, e)))
    }

    /// Parsed timezone
    pub fn tz(&self) -> CalendarResult<Tz> {
        parse_timezone(&self.timezone)
    }

    fn apply(&mut self, overrides: FileOverrides) {
        if let Some(timezone) = overrides.timezone {
            self.timezone = timezone;
        }
        if let Some(days) = overrides.lookahead_days {
            self.lookahead_days = days;
        }
        if let Some(days) = overrides.list_days_range {
            self.list_days_range = days;
        }
    }

    fn validate(&self) -> CalendarResult<()> {
        self.feed_url()?;
        self.tz()?;
        Ok(())
    }
}

fn parse_days_var(name: &str, default: u32) -> CalendarResult<u32> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|_| config_error(&format!("Invalid {} format: '{}'", name, value))),
        Err(_) => Ok(default),
    }
}

fn read_overrides(path: &Path) -> CalendarResult<Option<FileOverrides>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(toml::from_str::<FileOverrides>(&content)?))
}
